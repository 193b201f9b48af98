//! Method listings
//!
//! A listing is a small line-based text format describing methods and their typed variables,
//! the input of the command line tool. The main interface is [parse] which turns the text into
//! [MethodListing]s.
//!
//! ```text
//! // comment
//! method run (I[Ljava/lang/String;)V public static
//! var 0 0 int
//! var 2 0 java.util.List<String>
//!
//! method lambda$run$0 (I)V private static synthetic
//! inherit run
//! var 1 0 int
//! param 0 value int
//! ```
//!
//! Reading works in three phases:
//! - the [lexer] splits the text into keywords, words and line breaks
//! - the [parser] groups them into directives, recovering at the end of a broken line
//! - the directives are checked and assembled into methods
//!
//! Errors from all phases are collected and reported together, ordered by position.

use std::collections::HashSet;

use chumsky::error::SimpleReason;
use chumsky::{prelude::*, Stream};
use miette::Diagnostic;
use thiserror::Error;

use crate::descriptor::MethodDescriptor;
use crate::{AccessFlags, Span, VarVersion};

use lexer::Token;
use parser::Line;

mod lexer;
mod parser;

type ParseErr<T> = Simple<T, Span>;
type Spanned<T> = (T, Span);

#[derive(Debug, Error, Diagnostic)]
pub enum ListingError {
    #[error("Unknown directive: {directive}")]
    #[diagnostic(help("Expected one of: method, inherit, var, param"))]
    UnknownDirective {
        directive: String,

        #[label("here")]
        span: Span,
    },

    #[error("Encountered unexpected input: {token}")]
    UnexpectedInput {
        token: String,

        #[help]
        expected: Option<String>,

        #[label("here")]
        span: Span,
    },

    #[error("{msg}")]
    Custom {
        msg: String,

        #[label("here")]
        span: Span,
    },

    #[error("Missing {what}")]
    MissingArgument {
        what: &'static str,

        #[label("expected before this")]
        span: Span,
    },

    #[error("Expected a slot or version number, found {found}")]
    InvalidNumber {
        found: String,

        #[label("not a number")]
        span: Span,
    },

    #[error("Unknown access flag: {flag}")]
    UnknownFlag {
        flag: String,

        #[label("here")]
        span: Span,
    },

    #[error("Invalid method descriptor")]
    InvalidDescriptor {
        #[help]
        reason: String,

        #[label("this descriptor")]
        span: Span,
    },

    #[error("`{directive}` outside of a method")]
    #[diagnostic(help("Start a method with `method <name> <descriptor> [flags]` first"))]
    OutsideMethod {
        directive: String,

        #[label("here")]
        span: Span,
    },

    #[error("Method {name} is declared twice")]
    DuplicateMethod {
        name: String,

        #[label("second declaration")]
        span: Span,
    },

    #[error("Method {name} is not declared before this point")]
    #[diagnostic(help("A method can only inherit from a method listed above it"))]
    UnknownParent {
        name: String,

        #[label("inherited here")]
        span: Span,
    },

    #[error("Method {name} already inherits from another method")]
    SecondParent {
        name: String,

        #[label("second parent")]
        span: Span,
    },

    #[error("Variable {var} is listed twice")]
    DuplicateVariable {
        var: VarVersion,

        #[label("second occurrence")]
        span: Span,
    },
}

type Result<T> = std::result::Result<T, ListingError>;

impl ListingError {
    pub fn span(&self) -> Span {
        match self {
            ListingError::UnexpectedInput { span, .. }
            | ListingError::Custom { span, .. }
            | ListingError::UnknownDirective { span, .. }
            | ListingError::MissingArgument { span, .. }
            | ListingError::InvalidNumber { span, .. }
            | ListingError::UnknownFlag { span, .. }
            | ListingError::InvalidDescriptor { span, .. }
            | ListingError::OutsideMethod { span, .. }
            | ListingError::DuplicateMethod { span, .. }
            | ListingError::UnknownParent { span, .. }
            | ListingError::SecondParent { span, .. }
            | ListingError::DuplicateVariable { span, .. } => *span,
        }
    }
}

/// One method and everything that should be named in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodListing {
    pub name: String,
    pub flags: AccessFlags,
    pub descriptor: String,
    pub parent: Option<String>,
    pub variables: Vec<(VarVersion, String)>,
    pub parameters: Vec<ParameterRequest>,
}

/// A single parameter name asked for outside of batch renaming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRequest {
    pub slot: u32,
    pub name: String,
    pub typ: String,
}

/// Parse a listing, collecting every error instead of stopping at the first
pub fn parse(source: &str) -> std::result::Result<Vec<MethodListing>, Vec<ListingError>> {
    let end_of_input = Span::marker(source.len());

    let char_iter = source
        .char_indices()
        .map(|(i, c)| (c, Span::new(i, i + c.len_utf8())));

    let (tokens, lex_errs) =
        lexer::lex().parse_recovery(Stream::from_iter(end_of_input, char_iter));

    let mut errors: Vec<_> = lex_errs
        .into_iter()
        .map(|e| build_error(e.map(|c| c.to_string())))
        .collect();

    let mut reader = ListingReader::new(source);
    if let Some(mut tokens) = tokens {
        // the last directive needs a line break to end on, too
        if tokens.last().map(|(tok, _)| tok) != Some(&Token::Newline) {
            tokens.push((Token::Newline, end_of_input));
        }

        let (lines, parse_errs) =
            parser::parser().parse_recovery(Stream::from_iter(end_of_input, tokens.into_iter()));
        errors.extend(
            parse_errs
                .into_iter()
                .map(|e| build_error(e.map(|tok| tok.to_string()))),
        );

        for (line, span) in lines.into_iter().flatten() {
            if let Err(err) = reader.line(line, span) {
                errors.push(err);
            }
        }
    }

    if errors.is_empty() {
        Ok(reader.methods)
    } else {
        errors.sort_by_key(|err| err.span().start);
        Err(errors)
    }
}

/// Turn a chumsky error into our error type
fn build_error(err: ParseErr<String>) -> ListingError {
    let eol = String::from("end of line");
    match err.reason() {
        SimpleReason::Custom(msg) => ListingError::Custom {
            msg: msg.clone(),
            span: err.span(),
        },
        _ => match (err.found(), err.label()) {
            (None, Some(what)) => ListingError::MissingArgument {
                what,
                span: err.span(),
            },
            (Some(found), Some(what)) if *found == eol => ListingError::MissingArgument {
                what,
                span: err.span(),
            },
            (found, _) => {
                let expected = if err.expected().len() == 0 {
                    None
                } else {
                    let mut toks: Vec<_> = err
                        .expected()
                        .map(|tok| tok.as_ref().unwrap_or(&eol).clone())
                        .collect();
                    toks.sort_unstable();

                    let mut help_string = toks.join(", ");
                    help_string.insert_str(0, "Expected one of: ");

                    Some(help_string)
                };

                ListingError::UnexpectedInput {
                    token: found.unwrap_or(&eol).clone(),
                    expected,
                    span: err.span(),
                }
            }
        },
    }
}

#[derive(Debug)]
struct ListingReader<'src> {
    source: &'src str,
    methods: Vec<MethodListing>,
    seen_variables: HashSet<VarVersion>,

    /// Set after a rejected `method` line, until the next good one
    skipping: bool,
}

impl<'src> ListingReader<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            methods: Vec::new(),
            seen_variables: HashSet::new(),
            skipping: false,
        }
    }

    fn line(&mut self, line: Line, span: Span) -> Result<()> {
        match line {
            Line::Method {
                name,
                descriptor,
                flags,
            } => {
                self.seen_variables.clear();
                let result = self.method(name, descriptor, flags);
                self.skipping = result.is_err();
                result
            }
            Line::Inherit { parent } => {
                if self.skipping {
                    return Ok(());
                }
                self.inherit(parent, directive(span, "inherit"))
            }
            Line::Var { slot, version, typ } => {
                let (slot, _) = number(slot)?;
                let (version, version_span) = number(version)?;
                if self.skipping {
                    return Ok(());
                }

                let var = VarVersion::new(slot, version);
                let typ = self.text(typ);
                let Some(method) = self.methods.last_mut() else {
                    return Err(ListingError::OutsideMethod {
                        directive: String::from("var"),
                        span: directive(span, "var"),
                    });
                };
                if !self.seen_variables.insert(var) {
                    return Err(ListingError::DuplicateVariable {
                        var,
                        span: Span::new(span.start, version_span.end),
                    });
                }
                method.variables.push((var, typ));
                Ok(())
            }
            Line::Param { slot, name, typ } => {
                let (slot, _) = number(slot)?;
                if self.skipping {
                    return Ok(());
                }

                let typ = self.text(typ);
                self.current("param", directive(span, "param"))?
                    .parameters
                    .push(ParameterRequest {
                        slot,
                        name: name.0,
                        typ,
                    });
                Ok(())
            }
            Line::Unknown((name, span)) => Err(ListingError::UnknownDirective {
                directive: name,
                span,
            }),
            Line::Rejected(Token::Method) => {
                self.seen_variables.clear();
                self.skipping = true;
                Ok(())
            }
            Line::Rejected(_) => Ok(()),
        }
    }

    fn method(
        &mut self,
        (name, name_span): Spanned<String>,
        (descriptor, descriptor_span): Spanned<String>,
        flags: Vec<Spanned<String>>,
    ) -> Result<()> {
        if self.methods.iter().any(|m| m.name == name) {
            return Err(ListingError::DuplicateMethod {
                name,
                span: name_span,
            });
        }

        MethodDescriptor::parse(&descriptor).map_err(|err| ListingError::InvalidDescriptor {
            reason: err.to_string(),
            span: descriptor_span,
        })?;

        let mut access = AccessFlags::empty();
        for (keyword, span) in flags {
            access |= AccessFlags::from_keyword(&keyword)
                .ok_or(ListingError::UnknownFlag { flag: keyword, span })?;
        }

        self.methods.push(MethodListing {
            name,
            flags: access,
            descriptor,
            parent: None,
            variables: Vec::new(),
            parameters: Vec::new(),
        });
        Ok(())
    }

    fn inherit(&mut self, (parent, span): Spanned<String>, directive: Span) -> Result<()> {
        let Some((method, earlier)) = self.methods.split_last_mut() else {
            return Err(ListingError::OutsideMethod {
                directive: String::from("inherit"),
                span: directive,
            });
        };

        if !earlier.iter().any(|m| m.name == parent) {
            return Err(ListingError::UnknownParent { name: parent, span });
        }
        if method.parent.is_some() {
            return Err(ListingError::SecondParent {
                name: method.name.clone(),
                span,
            });
        }
        method.parent = Some(parent);
        Ok(())
    }

    fn current(&mut self, directive: &str, span: Span) -> Result<&mut MethodListing> {
        self.methods
            .last_mut()
            .ok_or_else(|| ListingError::OutsideMethod {
                directive: String::from(directive),
                span,
            })
    }

    fn text(&self, span: Span) -> String {
        String::from(&self.source[span.start..span.end])
    }
}

/// Span of the directive keyword at the start of a line
fn directive(line: Span, keyword: &str) -> Span {
    Span::new(line.start, line.start + keyword.len())
}

fn number((word, span): Spanned<String>) -> Result<(u32, Span)> {
    word.parse()
        .map(|n| (n, span))
        .map_err(|_| ListingError::InvalidNumber { found: word, span })
}
