//! Edit command implementation
//!
//! Runs a single [`PickerSession`] operation on a value and prints the
//! result, so each picker control can be driven from a shell.

use clap::{Subcommand, ValueEnum};
use std::process::ExitCode;

use crate::config::PickerConfig;
use crate::parser::parse_value;
use crate::picker::{PickerError, PickerSession};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Channel of the active color changed by `set`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Channel {
    R,
    G,
    B,
    A,
    Hue,
    Saturation,
    Lightness,
    Brightness,
}

/// A single picker operation
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Select the stop at INDEX
    Select { index: usize },

    /// Add a stop in the selected stop's color and select it
    AddStop {
        /// Stop position in percent (default: from config)
        #[arg(long, allow_negative_numbers = true)]
        at: Option<i64>,
    },

    /// Delete a stop (at least two must remain)
    DeleteStop {
        /// Stop index (default: the selected stop)
        #[arg(long)]
        index: Option<usize>,
    },

    /// Move the selected stop to POSITION percent
    MoveStop {
        #[arg(allow_negative_numbers = true)]
        position: i64,
    },

    /// Set one channel of the active color
    Set {
        #[arg(value_enum)]
        channel: Channel,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Set the linear gradient angle
    Degrees {
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },

    /// Switch a gradient to linear
    Linear,

    /// Switch a gradient to radial
    Radial,

    /// Switch to a solid color (default: from config)
    Solid { color: Option<String> },

    /// Switch to a gradient (default: from config)
    Gradient { value: Option<String> },
}

fn apply(picker: &mut PickerSession, op: EditOp) -> Result<String, PickerError> {
    match op {
        EditOp::Select { index } => picker.set_selected_point(index),
        EditOp::AddStop { at } => picker.add_point(at),
        EditOp::DeleteStop { index } => picker.delete_point(index),
        EditOp::MoveStop { position } => picker.set_point_left(position),
        EditOp::Set { channel, amount } => match channel {
            Channel::R => picker.set_r(amount),
            Channel::G => picker.set_g(amount),
            Channel::B => picker.set_b(amount),
            Channel::A => picker.set_a(amount),
            Channel::Hue => picker.set_hue(amount),
            Channel::Saturation => picker.set_saturation(amount),
            Channel::Lightness => picker.set_lightness(amount),
            Channel::Brightness => picker.set_brightness(amount),
        },
        EditOp::Degrees { degrees } => picker.set_degrees(degrees),
        EditOp::Linear => picker.set_linear(),
        EditOp::Radial => picker.set_radial(),
        EditOp::Solid { color } => picker.set_solid(color.as_deref()),
        EditOp::Gradient { value } => picker.set_gradient(value.as_deref()),
    }
}

/// Execute the edit command
pub fn run_edit(value: &str, op: EditOp, config: &PickerConfig) -> ExitCode {
    if let Err(e) = parse_value(value) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    let mut picker = PickerSession::with_config(value, |_| {}, config);
    let result = apply(&mut picker, op);

    for diagnostic in picker.diagnostics_mut().drain() {
        eprintln!("Warning: {}", diagnostic.message);
    }

    match result {
        Ok(new_value) => {
            println!("{}", new_value);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
