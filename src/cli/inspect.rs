//! Read-only command implementations (parse, convert)

use std::process::ExitCode;

use crate::color::Rgba;
use crate::convert::{self, cmyk_string, hsl_string, hsv_string, rgba_string, to_hex};
use crate::parser::parse_value;
use crate::serialize::serialize;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the parse command
pub fn run_parse(value: &str, json: bool) -> ExitCode {
    let parsed = match parse_value(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        match serde_json::to_string_pretty(&parsed) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: Failed to serialize value: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        println!("{}", serialize(&parsed));
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Resolve the color a conversion applies to: the active color of a parsed
/// value, or any other color text `convert` understands.
fn resolve_color(value: &str) -> Result<Rgba, String> {
    match parse_value(value) {
        Ok(parsed) => Ok(parsed.active_color().rgba),
        Err(parse_err) => convert::to_rgba(value).map_err(|_| parse_err.to_string()),
    }
}

/// Render `rgba` in one target format
fn format_target(rgba: Rgba, target: &str) -> Option<String> {
    let text = match target {
        "hsl" => hsl_string(rgba),
        "hsv" => hsv_string(rgba),
        "hex" => to_hex(rgba),
        "cmyk" => cmyk_string(rgba),
        "rgba" => rgba_string(rgba),
        _ => return None,
    };
    Some(text)
}

/// Execute the convert command
pub fn run_convert(value: &str, to: &str) -> ExitCode {
    if to != "all" && format_target(Rgba::opaque(0, 0, 0), to).is_none() {
        eprintln!("Error: --to must be one of hsl, hsv, hex, cmyk, rgba, all");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let rgba = match resolve_color(value) {
        Ok(rgba) => rgba,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if to == "all" {
        for target in ["rgba", "hex", "hsl", "hsv", "cmyk"] {
            if let Some(text) = format_target(rgba, target) {
                println!("{:<5} {}", format!("{}:", target), text);
            }
        }
    } else if let Some(text) = format_target(rgba, to) {
        println!("{}", text);
    }

    ExitCode::from(EXIT_SUCCESS)
}
