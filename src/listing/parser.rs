use chumsky::prelude::*;

use super::lexer::Token;
use super::{ParseErr, Spanned};
use crate::Span;

/// One directive, before any of its arguments are checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Method {
        name: Spanned<String>,
        descriptor: Spanned<String>,
        flags: Vec<Spanned<String>>,
    },
    Inherit {
        parent: Spanned<String>,
    },
    Var {
        slot: Spanned<String>,
        version: Spanned<String>,
        /// Types may contain spaces, e.g. `Map<String, Integer>`
        typ: Span,
    },
    Param {
        slot: Spanned<String>,
        name: Spanned<String>,
        typ: Span,
    },
    Unknown(Spanned<String>),

    /// A directive whose arguments did not parse, already reported
    Rejected(Token),
}

pub fn parser() -> impl Parser<Token, Vec<Spanned<Line>>, Error = ParseErr<Token>> {
    let word = select! {
        Token::Word(word) => word,
        Token::Method => String::from("method"),
        Token::Inherit => String::from("inherit"),
        Token::Var => String::from("var"),
        Token::Param => String::from("param"),
    };
    let spanned = word.clone().map_with_span(|word, span: Span| (word, span));
    let typ = word.clone().repeated().at_least(1).map_with_span(|_, span: Span| span);

    let rejected = |directive: Token| {
        skip_until([Token::Newline], move |_: Span| Line::Rejected(directive.clone()))
    };

    let method = just(Token::Method).ignore_then(
        spanned
            .clone()
            .labelled("method name")
            .then(spanned.clone().labelled("method descriptor"))
            .then(spanned.clone().repeated())
            .map(|((name, descriptor), flags)| Line::Method {
                name,
                descriptor,
                flags,
            })
            .recover_with(rejected(Token::Method)),
    );

    let inherit = just(Token::Inherit).ignore_then(
        spanned
            .clone()
            .labelled("parent method name")
            .map(|parent| Line::Inherit { parent })
            .recover_with(rejected(Token::Inherit)),
    );

    let var = just(Token::Var).ignore_then(
        spanned
            .clone()
            .labelled("slot")
            .then(spanned.clone().labelled("version"))
            .then(typ.clone().labelled("variable type"))
            .map(|((slot, version), typ)| Line::Var { slot, version, typ })
            .recover_with(rejected(Token::Var)),
    );

    let param = just(Token::Param).ignore_then(
        spanned
            .clone()
            .labelled("slot")
            .then(spanned.clone().labelled("parameter name"))
            .then(typ.labelled("parameter type"))
            .map(|((slot, name), typ)| Line::Param { slot, name, typ })
            .recover_with(rejected(Token::Param)),
    );

    let unknown = select! { Token::Word(word) => word }
        .map_with_span(|word, span: Span| (word, span))
        .then_ignore(word.repeated())
        .map(Line::Unknown);

    let line = choice((method, inherit, var, param, unknown))
        .map_with_span(|line, span: Span| (line, span))
        .then_ignore(just(Token::Newline))
        .map(Some)
        .recover_with(skip_until([Token::Newline], |_: Span| None).consume_end())
        .then_ignore(just(Token::Newline).repeated());

    just(Token::Newline)
        .repeated()
        .ignore_then(line.repeated())
        .then_ignore(end())
        .map(|lines| lines.into_iter().flatten().collect())
}
