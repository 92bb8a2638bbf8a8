/// Text format for mesh connectivity
///
/// A topology file declares a vertex count and lists polygons, one per
/// line, as whitespace-separated vertex indices:
///
/// ```text
/// # a square with a diagonal
/// vertices 4
/// 0 1 2 3
/// 0 2
/// ```
use std::path::Path;

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{char, digit1, line_ending, multispace1, space0, space1},
    combinator::{all_consuming, eof, map_res, opt, value},
    multi::{many0, separated_list1},
    sequence::{pair, preceded, terminated},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::{Mesh, VertexId};
use crate::vector::Vector3;

/// Vertex count plus the polygons whose sides become edges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologySpec {
    pub vertex_count: usize,
    pub polygons: Vec<Vec<VertexId>>,
}

impl TopologySpec {
    pub fn new(vertex_count: usize, polygons: Vec<Vec<VertexId>>) -> Self {
        Self {
            vertex_count,
            polygons,
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        match all_consuming(parse_document)(input) {
            Ok((_, spec)) => Ok(spec),
            Err(e) => Err(Error::Parse(format!("{:?}", e))),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Build a mesh from this topology with the given starting positions.
    pub fn build(&self, positions: Vec<Vector3>) -> Result<Mesh> {
        if positions.len() != self.vertex_count {
            return Err(Error::VertexCountMismatch {
                expected: self.vertex_count,
                actual: positions.len(),
            });
        }
        Mesh::from_polygons(positions, &self.polygons)
    }
}

fn comment(input: &str) -> IResult<&str, ()> {
    value((), pair(char('#'), opt(is_not("\r\n"))))(input)
}

fn blank(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((value((), multispace1), comment))))(input)
}

fn index(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| digits.parse::<usize>())(input)
}

/// `vertices N`, alone on its line apart from a trailing comment
fn header(input: &str) -> IResult<&str, usize> {
    let end_of_line = alt((value((), line_ending), comment, value((), eof)));
    terminated(
        preceded(pair(tag("vertices"), space1), index),
        pair(space0, end_of_line),
    )(input)
}

fn polygon(input: &str) -> IResult<&str, Vec<VertexId>> {
    terminated(separated_list1(space1, index), space0)(input)
}

fn parse_document(input: &str) -> IResult<&str, TopologySpec> {
    let (input, _) = blank(input)?;
    let (input, vertex_count) = header(input)?;
    let (input, polygons) = many0(preceded(blank, polygon))(input)?;
    let (input, _) = blank(input)?;
    Ok((input, TopologySpec::new(vertex_count, polygons)))
}
