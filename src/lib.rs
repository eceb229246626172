//! huepick - Library for parsing, converting and editing CSS colors and gradients
//!
//! This library provides functionality to:
//! - Parse solid color tokens and linear/radial gradient values
//! - Convert colors between RGB, HSL, HSV, Hex and CMYK
//! - Edit gradient stops and color channels through a picker session
//! - Serialize values back to canonical CSS text

pub mod cli;
pub mod color;
pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod math;
pub mod parser;
pub mod picker;
pub mod recent;
pub mod serialize;
pub mod stops;
pub mod value;
