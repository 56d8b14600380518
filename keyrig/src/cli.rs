//! Root CLI structure for keyrig

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use keyrig_anim::SampleMode;

#[derive(Parser)]
#[command(name = "keyrig")]
#[command(about = "Inspect, validate and pose keyframe animation rigs", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display information about a rig document
    Info {
        /// Path to the rig JSON file
        file: PathBuf,
    },

    /// Check a rig document for configuration and content errors
    Validate {
        /// Path to the rig JSON file
        file: PathBuf,
    },

    /// Run one animation pass and print the resulting bone poses
    Pose {
        /// Path to the rig JSON file
        file: PathBuf,

        /// Clip name or numeric state id
        #[arg(short, long)]
        state: String,

        /// Normalized playback position in [0, 1)
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        progress: f32,

        /// Override the rig's sampling mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Bone index to bind an item attachment to
        #[arg(long)]
        attach_bone: Option<usize>,

        /// Attachment offset from the bone origin, as x,y,z
        #[arg(long, value_parser = parse_vec3, default_value = "0,0,0")]
        attach_offset: [f32; 3],

        /// Report positions in the renderer's Y-up space instead of rig space
        #[arg(long)]
        world: bool,

        /// Print the pose as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a rig document with every field spelled out
    Export {
        /// Input rig JSON file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the built-in rig layouts
    Layouts,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Sampling mode selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Lerp,
    Held,
}

impl From<ModeArg> for SampleMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Lerp => SampleMode::Lerp,
            ModeArg::Held => SampleMode::Held,
        }
    }
}

/// Parse `x,y,z` into three floats
pub fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{s}'"));
    }

    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid component '{part}': {e}"))?;
    }
    Ok(out)
}
