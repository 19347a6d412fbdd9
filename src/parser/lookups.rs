use std::collections::HashMap;

use crate::{
    ast::expressions::ExprNode,
    errors::errors::Error,
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::expr::*;

/// Precedence of a token in infix position. Higher binds tighter.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct BindingPower(pub i32);

impl BindingPower {
    pub const DEFAULT: BindingPower = BindingPower(0);
    /// `)` sits below every real operator so it always ends an expression.
    pub const CLOSE_PAREN: BindingPower = BindingPower(1);
    pub const ADDITIVE: BindingPower = BindingPower(20);
    pub const MULTIPLICATIVE: BindingPower = BindingPower(30);
    pub const POWER: BindingPower = BindingPower(40);
    pub const GROUPING: BindingPower = BindingPower(50);

    pub fn lowered(self) -> Self {
        BindingPower(self.0 - 1)
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Associativity {
    Left,
    Right,
}

pub type NUDHandler = fn(&mut Lexer<'_>, &Lookups, Token) -> Result<ExprNode, Error>;
pub type LEDHandler = fn(&mut Lexer<'_>, &Lookups, ExprNode, Token) -> Result<ExprNode, Error>;

pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
pub type AssociativityLookup = HashMap<TokenKind, Associativity>;

/// Dispatch tables for the expression parser, keyed by token kind.
pub struct Lookups {
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
    associativity_lookup: AssociativityLookup,
}

impl Lookups {
    pub fn new() -> Self {
        let mut lookups = Lookups {
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            associativity_lookup: HashMap::new(),
        };
        create_token_lookups(&mut lookups);
        lookups
    }

    pub fn get_nud(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    pub fn get_led(&self, kind: TokenKind) -> Option<LEDHandler> {
        self.led_lookup.get(&kind).copied()
    }

    /// Tokens without an entry bind with `BindingPower::DEFAULT`.
    pub fn binding_power(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::DEFAULT)
    }

    pub fn associativity(&self, kind: TokenKind) -> Associativity {
        self.associativity_lookup
            .get(&kind)
            .copied()
            .unwrap_or(Associativity::Left)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(
        &mut self,
        kind: TokenKind,
        binding_power: BindingPower,
        associativity: Associativity,
        led_fn: LEDHandler,
    ) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.associativity_lookup.insert(kind, associativity);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token. The
    /// token's binding power is left untouched.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn bp(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }
}

impl Default for Lookups {
    fn default() -> Self {
        Lookups::new()
    }
}

pub fn create_token_lookups(lookups: &mut Lookups) {
    // Sentinels
    lookups.bp(TokenKind::CloseParen, BindingPower::CLOSE_PAREN);
    lookups.bp(TokenKind::OpenParen, BindingPower::GROUPING);

    // Additive, multiplicative and power
    lookups.led(TokenKind::Plus, BindingPower::ADDITIVE, Associativity::Left, parse_binary_expr);
    lookups.led(TokenKind::Dash, BindingPower::ADDITIVE, Associativity::Left, parse_binary_expr);
    lookups.led(TokenKind::Star, BindingPower::MULTIPLICATIVE, Associativity::Left, parse_binary_expr);
    lookups.led(TokenKind::Caret, BindingPower::POWER, Associativity::Right, parse_binary_expr);

    // Literals and symbols
    lookups.nud(TokenKind::Integer, parse_primary_expr);
    lookups.nud(TokenKind::Float, parse_primary_expr);
    lookups.nud(TokenKind::Boolean, parse_primary_expr);
    lookups.nud(TokenKind::Identifier, parse_primary_expr);
    lookups.nud(TokenKind::Plus, parse_prefix_expr);
    lookups.nud(TokenKind::Dash, parse_prefix_expr);
    lookups.nud(TokenKind::OpenParen, parse_grouping_expr);
}
