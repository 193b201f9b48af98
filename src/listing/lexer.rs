use std::fmt;

use chumsky::prelude::*;

use super::{ParseErr, Spanned};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Method,
    Inherit,
    Var,
    Param,

    /// Anything else up to the next whitespace
    Word(String),

    Newline,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Method => write!(f, "method"),
            Token::Inherit => write!(f, "inherit"),
            Token::Var => write!(f, "var"),
            Token::Param => write!(f, "param"),
            Token::Word(word) => write!(f, "{word}"),
            Token::Newline => write!(f, "end of line"),
        }
    }
}

pub fn lex() -> impl Parser<char, Vec<Spanned<Token>>, Error = ParseErr<char>> {
    let newline = just('\n').to(Token::Newline);

    let word = filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(|word| match word.as_str() {
            "method" => Token::Method,
            "inherit" => Token::Inherit,
            "var" => Token::Var,
            "param" => Token::Param,
            _ => Token::Word(word),
        });

    let comment = just("//").then(filter(|c: &char| *c != '\n').repeated());

    // newlines end a directive, all other whitespace only separates words
    let blank = filter(|c: &char| c.is_whitespace() && *c != '\n')
        .ignored()
        .or(comment.ignored());

    let token = newline
        .or(word)
        .map_with_span(|tok, span| (tok, span))
        .padded_by(blank.clone().repeated());

    blank
        .repeated()
        .ignore_then(token.repeated())
        .then_ignore(end())
}
