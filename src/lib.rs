#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorTip},
    parser::context::Diagnostic,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Source line and the name of the input it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn file(&self) -> &str {
        &self.1
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

/// Returns the text of the 1-based `line` of `source`, without its newline.
pub fn get_source_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.trim_end_matches('\r'))
}


/// Renders the offending line in the layout used for every report:
///
/// ```text
///    |
/// 20 | x = 1 + ;
///    |
/// ```
pub fn render_snippet(source: &str, line: u32) -> String {
    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    let text = get_source_line(source, line).unwrap_or("");

    format!(
        "{:>padding$}\n{} | {}\n{:>padding$}",
        "|",
        line_string,
        remove_starting_whitespace(text),
        "|"
    )
}

pub fn display_error(error: &Error, source: &str) {
    /*
        Error: UnexpectedEof (Reached end of file while recovering statement)
        -> prog.fx:20
           |
        20 | x = 1
           |
    */

    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", position);
    println!("{}", render_snippet(source, position.line()));
}

pub fn display_diagnostic(diagnostic: &Diagnostic, source: &str) {
    println!("{}", diagnostic);
    println!("{}", render_snippet(source, diagnostic.position.line()));
}

fn remove_starting_whitespace(string: &str) -> &str {
    string.trim_start_matches([' ', '\t'])
}
