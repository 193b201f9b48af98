//! Tree view of naming families, for inspection on the command line

use std::borrow::Cow;
use std::io;

use ptree::{Style, TreeItem};

use crate::{CounterRegistry, CounterState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyTree {
    label: String,
    children: Vec<FamilyTree>,
}

impl FamilyTree {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: Vec::new(),
        }
    }

    /// Families and aliases of a registry under a root labelled `title`
    pub fn new(title: &str, registry: &CounterRegistry) -> Self {
        let families = registry
            .families()
            .into_iter()
            .map(|(key, state)| Self::family(key, state))
            .collect();

        let aliases = registry
            .remap()
            .entries()
            .into_iter()
            .map(|(from, to)| Self::leaf(format!("{from} -> {to}")))
            .collect();

        Self {
            label: String::from(title),
            children: vec![
                Self {
                    label: String::from("families"),
                    children: families,
                },
                Self {
                    label: String::from("aliases"),
                    children: aliases,
                },
            ],
        }
    }

    fn family(key: &str, state: &CounterState) -> Self {
        let mut label = format!("{key} [{}] next {}", state.candidates().join(" "), state.peek());
        if !state.skip_zero() {
            label.push_str(" (numbered from 0)");
        }
        Self::leaf(label)
    }

    pub fn print(&self) -> io::Result<()> {
        ptree::print_tree(self)
    }

    pub fn write<W: io::Write>(&self, out: W) -> io::Result<()> {
        ptree::write_tree(self, out)
    }
}

impl TreeItem for FamilyTree {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, style: &Style) -> io::Result<()> {
        write!(f, "{}", style.paint(&self.label))
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::from(&self.children[..])
    }
}
