//! Parsing and printing of the textual automaton format.
//!
//! The input format is a sequence of whitespace separated tokens:
//!
//! ```text
//! 1ab          alphabet, the first symbol is the epsilon marker
//! 3            number of edges
//! 0 a 1        the edges as `from symbol to`
//! 1 b 0
//! 0 1 2
//! 0            start vertex
//! 2            number of terminal vertices
//! 0 2          the terminal vertices
//! ```
//!
//! Reading into an existing automaton replaces the alphabet and the start,
//! clears the terminal set before filling it and adds the edges to the ones
//! already present.
//!
//! The [`Display`] implementation of [`Automaton`] prints a human readable
//! dump that is not meant to be parsed again, [`ToAutomatonFormat`] prints the
//! input format.
use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use nom::{
    Parser,
    bytes::complete::take_till1,
    character::complete::{multispace0, satisfy},
    error::ParseError,
};

use crate::automaton::{Alphabet, Automaton, VertexId};

type Error<'a> = nom::error::Error<&'a str>;

fn vertex_id<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, VertexId, E> {
    let (input, _) = multispace0(input)?;
    nom::character::complete::u32(input)
}

fn symbol<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, char, E> {
    let (input, _) = multispace0(input)?;
    satisfy(|c: char| !c.is_whitespace()).parse(input)
}

fn alphabet<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, &'a str, E> {
    let (input, _) = multispace0(input)?;
    take_till1(|c: char| c.is_whitespace()).parse(input)
}

#[test]
fn test_alphabet_1() {
    let (rest, alphabet) = alphabet::<Error>("  1ab\n3").unwrap();
    assert_eq!(alphabet, "1ab");
    assert_eq!(rest, "\n3");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSpec {
    pub from: VertexId,
    pub symbol: char,
    pub to: VertexId,
}

fn edge<'a, E: ParseError<&'a str>>(input: &'a str) -> nom::IResult<&'a str, EdgeSpec, E> {
    let (input, from) = vertex_id(input)?;
    let (input, symbol) = symbol(input)?;
    let (input, to) = vertex_id(input)?;

    Ok((input, EdgeSpec { from, symbol, to }))
}

#[test]
fn test_edge_1() {
    let (_, edge) = edge::<Error>("0 a 12").unwrap();
    assert_eq!(
        edge,
        EdgeSpec {
            from: 0,
            symbol: 'a',
            to: 12
        }
    );
}

#[test]
fn test_edge_2() {
    // the epsilon marker is commonly a digit
    let (_, edge) = edge::<Error>("\n 3 1 4").unwrap();
    assert_eq!(edge.from, 3);
    assert_eq!(edge.symbol, '1');
    assert_eq!(edge.to, 4);
}

#[test]
fn test_edge_3() {
    assert!(edge::<Error>("0 a").is_err());
    assert!(edge::<Error>("x a 1").is_err());
}

/// A length prefixed list, e.g. `2 0 3`.
fn counted<'a, O, E, F>(input: &'a str, element: F) -> nom::IResult<&'a str, Vec<O>, E>
where
    E: ParseError<&'a str>,
    F: Parser<&'a str, Output = O, Error = E>,
{
    let (input, n) = vertex_id(input)?;
    nom::multi::count(element, n as usize).parse(input)
}

#[test]
fn test_counted_1() {
    let (_, terminals) = counted::<_, Error, _>("3 0 4 7", vertex_id).unwrap();
    assert_eq!(terminals, vec![0, 4, 7]);

    let (_, terminals) = counted::<_, Error, _>("0", vertex_id).unwrap();
    assert!(terminals.is_empty());
}

#[test]
fn test_counted_2() {
    // fewer elements than announced
    assert!(counted::<_, Error, _>("3 0 4", vertex_id).is_err());
}

/// The parsed, not yet validated content of an automaton file.
#[derive(Debug, Clone)]
pub struct AutomatonSpec<'a> {
    pub alphabet: &'a str,
    pub edges: Vec<EdgeSpec>,
    pub start: VertexId,
    pub terminals: Vec<VertexId>,
}

impl<'a> AutomatonSpec<'a> {
    fn p(input: &'a str) -> nom::IResult<&'a str, AutomatonSpec<'a>, Error<'a>> {
        let (input, alphabet) = alphabet::<Error>(input)?;
        let (input, edges) = counted::<_, Error, _>(input, edge)?;
        let (input, start) = vertex_id::<Error>(input)?;
        let (input, terminals) = counted::<_, Error, _>(input, vertex_id)?;
        let (input, _) = multispace0(input)?;

        Ok((
            input,
            AutomatonSpec {
                alphabet,
                edges,
                start,
                terminals,
            },
        ))
    }

    pub fn parse(input: &'a str) -> anyhow::Result<AutomatonSpec<'a>> {
        match Self::p(input) {
            Ok(("", spec)) => Ok(spec),
            Ok((rest, _)) => Err(anyhow::anyhow!(
                "Unexpected trailing input after the terminal list: {:?}",
                rest.lines().next().unwrap_or_default()
            )),
            Err(e) => Err(anyhow::anyhow!("Failed to parse automaton: {}", e)),
        }
    }

    /// Loads the parsed content into `automaton`. Nothing is modified if the
    /// content is invalid.
    pub fn apply_to(&self, automaton: &mut Automaton) -> anyhow::Result<()> {
        let alphabet = Alphabet::new(self.alphabet)?;

        for edge in &self.edges {
            if !alphabet.contains(edge.symbol) {
                anyhow::bail!(
                    "Edge {} -> {} uses symbol '{}' which is not part of the alphabet '{}'.",
                    edge.from,
                    edge.to,
                    edge.symbol,
                    alphabet
                );
            }
        }

        automaton.set_alphabet(alphabet);
        for edge in &self.edges {
            automaton.add_edge(edge.from, edge.symbol, edge.to);
        }
        automaton.set_start(self.start);
        automaton.clear_terminals();
        for &terminal in &self.terminals {
            automaton.add_terminal(terminal);
        }

        Ok(())
    }
}

#[test]
fn test_spec_1() {
    let spec_str = r#"
    1ab
    6
    0 a 1
    1 b 0
    0 b 2
    2 a 0
    0 a 3
    0 b 3
    0
    2
    0 3
    "#;
    let spec = AutomatonSpec::parse(spec_str).unwrap();
    assert_eq!(spec.alphabet, "1ab");
    assert_eq!(spec.edges.len(), 6);
    assert_eq!(spec.start, 0);
    assert_eq!(spec.terminals, vec![0, 3]);
}

#[test]
fn test_spec_2() {
    assert!(AutomatonSpec::parse("1ab 1 0 a 1 0 1 1 garbage").is_err());
    assert!(AutomatonSpec::parse("1ab 2 0 a 1 0").is_err());
    assert!(AutomatonSpec::parse("").is_err());
}

/// Parses a complete automaton from the textual format.
pub fn parse_automaton(input: &str) -> anyhow::Result<Automaton> {
    let spec = AutomatonSpec::parse(input)?;
    let mut automaton = Automaton::new(Alphabet::new(spec.alphabet)?, spec.start);
    spec.apply_to(&mut automaton)?;
    Ok(automaton)
}

/// Reads the textual format into an existing automaton, see the module
/// documentation for the merge semantics.
pub fn read_into(automaton: &mut Automaton, input: &str) -> anyhow::Result<()> {
    AutomatonSpec::parse(input)?.apply_to(automaton)
}

impl FromStr for Automaton {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_automaton(s)
    }
}

impl Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "vertices: {}", self.vertex_count())?;
        writeln!(f, "edges: {}", self.edge_count())?;

        for vertex in self.vertices() {
            for (symbol, to) in vertex.iter_edges() {
                writeln!(f, "{}----{}---->{}", vertex.id(), symbol, to)?;
            }
        }

        writeln!(f, "start: {}", self.start())?;
        write!(f, "terminals: {}", self.terminals().iter().join(" "))
    }
}

pub trait ToAutomatonFormat {
    fn to_automaton_format(&self) -> String;
}

impl ToAutomatonFormat for Automaton {
    fn to_automaton_format(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("{}\n", self.alphabet()));

        out.push_str(&format!("{}\n", self.edge_count()));
        for vertex in self.vertices() {
            for (symbol, to) in vertex.iter_edges() {
                out.push_str(&format!("{} {} {}\n", vertex.id(), symbol, to));
            }
        }

        out.push_str(&format!("{}\n", self.start()));

        out.push_str(&format!("{}\n", self.terminals().len()));
        out.push_str(&self.terminals().iter().join(" "));
        out.push('\n');

        out
    }
}
