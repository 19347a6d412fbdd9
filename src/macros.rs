//! Utility macros for the front-end.
//!
//! - `MK_TOKEN!` - Creates a Token instance

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's lexeme
/// * `$position` - The source position
/// * `$literal` - The decoded literal payload (defaults to `Literal::None`)
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), position, Literal::Integer(42));
/// let semicolon = MK_TOKEN!(TokenKind::Semicolon, ";".to_string(), position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $position:expr) => {
        $crate::MK_TOKEN!(
            $kind,
            $value,
            $position,
            $crate::lexer::tokens::Literal::None
        )
    };
    ($kind:expr, $value:expr, $position:expr, $literal:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            position: $position,
            literal: $literal,
        }
    };
}
