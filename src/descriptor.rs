//! Method descriptors
//!
//! Just enough of the JVM descriptor grammar to know how many local variable slots a method's
//! parameters take up. Anything below that slot count is a parameter, everything above is a
//! true local.

use std::fmt;

use chumsky::prelude::*;
use miette::Diagnostic;
use thiserror::Error;

use crate::AccessFlags;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DescriptorError {
    #[error("Unexpected {found:?} at offset {offset} in method descriptor {descriptor:?}")]
    UnexpectedChar {
        descriptor: String,
        found: char,
        offset: usize,

        #[help]
        expected: Option<String>,
    },

    #[error("Method descriptor {descriptor:?} ends unexpectedly")]
    UnexpectedEnd {
        descriptor: String,

        #[help]
        expected: Option<String>,
    },
}

type Result<T> = std::result::Result<T, DescriptorError>;

/// A field type from a descriptor, or `void`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JvmType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Object(String),
    Array(Box<JvmType>),
    Void,
}

impl JvmType {
    /// Number of local variable slots a value of this type occupies
    pub fn slot_width(&self) -> u32 {
        match self {
            JvmType::Long | JvmType::Double => 2,
            JvmType::Void => 0,
            _ => 1,
        }
    }
}

impl fmt::Display for JvmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JvmType::Byte => write!(f, "byte"),
            JvmType::Char => write!(f, "char"),
            JvmType::Double => write!(f, "double"),
            JvmType::Float => write!(f, "float"),
            JvmType::Int => write!(f, "int"),
            JvmType::Long => write!(f, "long"),
            JvmType::Short => write!(f, "short"),
            JvmType::Boolean => write!(f, "boolean"),
            JvmType::Object(name) => write!(f, "{}", name.replace('/', ".")),
            JvmType::Array(element) => write!(f, "{element}[]"),
            JvmType::Void => write!(f, "void"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub params: Vec<JvmType>,
    pub return_type: JvmType,
}

impl MethodDescriptor {
    pub fn parse(descriptor: &str) -> Result<Self> {
        parser().parse(descriptor).map_err(|errors| {
            errors.into_iter().next().map_or_else(
                || DescriptorError::UnexpectedEnd {
                    descriptor: String::from(descriptor),
                    expected: None,
                },
                |err| build_error(descriptor, err),
            )
        })
    }

    /// Slots taken by the receiver (unless static) and all parameters
    pub fn parameter_slots(&self, flags: AccessFlags) -> u32 {
        let receiver = if flags.is_static() { 0 } else { 1 };
        receiver + self.params.iter().map(JvmType::slot_width).sum::<u32>()
    }
}

/// `(` field types `)` return type
fn parser() -> impl Parser<char, MethodDescriptor, Error = Simple<char>> {
    let field_type = recursive(|field_type| {
        let primitive = select! {
            'B' => JvmType::Byte,
            'C' => JvmType::Char,
            'D' => JvmType::Double,
            'F' => JvmType::Float,
            'I' => JvmType::Int,
            'J' => JvmType::Long,
            'S' => JvmType::Short,
            'Z' => JvmType::Boolean,
        };

        let object = filter(|c: &char| *c != ';')
            .repeated()
            .collect::<String>()
            .delimited_by(just('L'), just(';'))
            .map(JvmType::Object);

        let array = just('[')
            .ignore_then(field_type)
            .map(|element| JvmType::Array(Box::new(element)));

        primitive.or(object).or(array)
    });

    let return_type = just('V').to(JvmType::Void).or(field_type.clone());

    field_type
        .repeated()
        .delimited_by(just('('), just(')'))
        .then(return_type)
        .then_ignore(end())
        .map(|(params, return_type)| MethodDescriptor {
            params,
            return_type,
        })
}

fn build_error(descriptor: &str, err: Simple<char>) -> DescriptorError {
    let mut toks: Vec<_> = err
        .expected()
        .map(|tok| match tok {
            Some(c) => format!("'{c}'"),
            None => String::from("end of descriptor"),
        })
        .collect();
    toks.sort_unstable();

    let expected = if toks.is_empty() {
        None
    } else {
        Some(format!("Expected one of: {}", toks.join(", ")))
    };

    match err.found() {
        Some(found) => DescriptorError::UnexpectedChar {
            descriptor: String::from(descriptor),
            found: *found,
            offset: err.span().start,
            expected,
        },
        None => DescriptorError::UnexpectedEnd {
            descriptor: String::from(descriptor),
            expected,
        },
    }
}
