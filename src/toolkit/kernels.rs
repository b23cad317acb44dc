//! Kernel file loading and the loaded-file table.
//!
//! The toolkit reads text kernels: a `KPL/<type>` header line, free comment
//! text, and one or more data blocks delimited by `\begindata` /
//! `\begintext` markers. A data block is a sequence of assignments,
//!
//! ```text
//!    BODY399_GM     =  398600.435436
//!    BODY399_RADII  =  ( 6378.1366, 6378.1366, 6356.7519 )
//!    MISSION_PHASES += ( 'CRUISE', 'APPROACH' )
//! ```
//!
//! with numeric or quoted-text values. Assignments merge into the kernel
//! pool. Files of type `KPL/EPH` additionally carry discrete-state ephemeris
//! segments, `EPHEMERIS_<code>_EPOCHS` / `EPHEMERIS_<code>_STATES`, which go
//! to the segment table instead of the pool.
//!
//! Every load is recorded in the file table under a fresh integer handle;
//! unloading withdraws the file's segments and the pool variables it
//! introduced. Handle validity is owned entirely by this table.

use std::fs;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0},
    combinator::map,
    multi::many0,
    number::complete::double,
    sequence::{delimited, preceded},
    IResult, Parser,
};
use once_cell::sync::Lazy;
use regex::Regex;

use super::ephemeris::Segment;
use super::pool::{self, PoolEntry};
use super::{with_state, ToolkitState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelKind {
    /// Pool-only text kernel (`KPL/PCK`, `KPL/TK`, …).
    Text,
    /// Text kernel carrying ephemeris segments (`KPL/EPH`).
    Ephemeris,
}

#[derive(Debug, Clone)]
pub(crate) struct LoadedKernel {
    pub(crate) handle: i32,
    pub(crate) path: String,
    pub(crate) kind: KernelKind,
    /// Pool variables this file introduced, withdrawn again on unload.
    pool_names: Vec<String>,
}

// -------------------------------------------------------------------------------------------------
// Grammar
// -------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Assignment {
    name: String,
    append: bool,
    values: Vec<Token>,
}

fn separators(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_whitespace() || c == ',').parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-').parse(input)
}

fn quoted(input: &str) -> IResult<&str, Token> {
    map(
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        |text: &str| Token::Text(text.to_owned()),
    )
    .parse(input)
}

fn bare_value(input: &str) -> IResult<&str, Token> {
    alt((quoted, map(double, Token::Num))).parse(input)
}

fn value_list(input: &str) -> IResult<&str, Vec<Token>> {
    delimited(
        char('('),
        many0(preceded(separators, bare_value)),
        preceded(separators, char(')')),
    )
    .parse(input)
}

fn assignment(input: &str) -> IResult<&str, Assignment> {
    map(
        (
            preceded(multispace0, identifier),
            preceded(multispace0, alt((tag("+="), tag("=")))),
            preceded(
                multispace0,
                alt((value_list, map(bare_value, |token| vec![token]))),
            ),
        ),
        |(name, op, values)| Assignment {
            name: name.to_owned(),
            append: op == "+=",
            values,
        },
    )
    .parse(input)
}

fn data_block(input: &str) -> IResult<&str, Vec<Assignment>> {
    let (rest, assignments) = many0(assignment).parse(input)?;
    let (rest, _) = multispace0(rest)?;
    Ok((rest, assignments))
}

/// Extract the `\begindata` block contents of a kernel file.
fn data_text(contents: &str) -> String {
    let mut in_data = false;
    let mut collected = String::new();
    for line in contents.lines() {
        match line.trim() {
            r"\begindata" => in_data = true,
            r"\begintext" => in_data = false,
            body if in_data => {
                collected.push_str(body);
                collected.push('\n');
            }
            _ => {}
        }
    }
    collected
}

fn entry_of(values: &[Token]) -> Option<PoolEntry> {
    if values.iter().all(|token| matches!(token, Token::Num(_))) {
        return Some(PoolEntry::Doubles(
            values
                .iter()
                .filter_map(|token| match token {
                    Token::Num(value) => Some(*value),
                    Token::Text(_) => None,
                })
                .collect(),
        ));
    }
    if values.iter().all(|token| matches!(token, Token::Text(_))) {
        return Some(PoolEntry::Strings(
            values
                .iter()
                .filter_map(|token| match token {
                    Token::Text(text) => Some(text.clone()),
                    Token::Num(_) => None,
                })
                .collect(),
        ));
    }
    None
}

// -------------------------------------------------------------------------------------------------
// Segment extraction
// -------------------------------------------------------------------------------------------------

static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^EPHEMERIS_(-?\d+)_(EPOCHS|STATES)$").expect("segment pattern"));

/// Split the assignments of a `KPL/EPH` file into ephemeris segment data and
/// ordinary pool assignments, with a diagnostic on malformed segment
/// definitions. Repeated epoch/state pairs for one body produce one segment
/// per pair, in file order.
fn extract_segments(
    assignments: Vec<Assignment>,
    handle: i32,
) -> Result<(Vec<Segment>, Vec<Assignment>), String> {
    let mut epochs_by_code: Vec<(i32, Vec<f64>)> = Vec::new();
    let mut states_by_code: Vec<(i32, Vec<f64>)> = Vec::new();
    let mut rest = Vec::new();

    for assignment in assignments {
        let Some(captures) = SEGMENT_RE.captures(&assignment.name) else {
            rest.push(assignment);
            continue;
        };
        let code: i32 = captures[1]
            .parse()
            .map_err(|_| format!("'{}' has an unreadable body code.", assignment.name))?;
        let PoolEntry::Doubles(values) = entry_of(&assignment.values)
            .ok_or_else(|| format!("'{}' mixes numeric and text values.", assignment.name))?
        else {
            return Err(format!("'{}' must be numeric.", assignment.name));
        };
        match &captures[2] {
            "EPOCHS" => epochs_by_code.push((code, values)),
            _ => states_by_code.push((code, values)),
        }
    }

    let mut segments = Vec::new();
    for (code, epochs) in epochs_by_code {
        let position = states_by_code
            .iter()
            .position(|(state_code, _)| *state_code == code)
            .ok_or_else(|| format!("EPHEMERIS_{code}_EPOCHS has no matching state list."))?;
        let (_, states) = states_by_code.swap_remove(position);

        if epochs.len() < 2 {
            return Err(format!(
                "EPHEMERIS_{code}_EPOCHS needs at least two epochs."
            ));
        }
        if epochs.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(format!(
                "EPHEMERIS_{code}_EPOCHS must be strictly ascending."
            ));
        }
        if states.len() != 6 * epochs.len() {
            return Err(format!(
                "EPHEMERIS_{code}_STATES has {} values, expected {}.",
                states.len(),
                6 * epochs.len()
            ));
        }
        let states = states
            .chunks_exact(6)
            .map(|row| [row[0], row[1], row[2], row[3], row[4], row[5]])
            .collect();
        segments.push(Segment {
            body: code,
            epochs,
            states,
            handle,
        });
    }
    if let Some((code, _)) = states_by_code.first() {
        return Err(format!(
            "EPHEMERIS_{code}_STATES has no matching epoch list."
        ));
    }
    Ok((segments, rest))
}

// -------------------------------------------------------------------------------------------------
// Entry points
// -------------------------------------------------------------------------------------------------

/// Load one kernel file, writing its fresh handle into `handle`. Missing
/// files signal `NOSUCHFILE`; a missing `KPL/` header signals
/// `BADKERNELTYPE`; grammar or segment errors signal `BADKERNELFILE`.
pub(crate) fn load(path: &str, handle: &mut i32) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(io_error) => {
            super::errors::signal(
                "NOSUCHFILE",
                format!("Could not read kernel file '{path}': {io_error}."),
            );
            return;
        }
    };

    let header = contents.lines().find(|line| !line.trim().is_empty());
    let kind = match header.map(str::trim) {
        Some("KPL/EPH") => KernelKind::Ephemeris,
        Some(header) if header.starts_with("KPL/") => KernelKind::Text,
        _ => {
            super::errors::signal(
                "BADKERNELTYPE",
                format!("'{path}' does not start with a KPL/<type> header line."),
            );
            return;
        }
    };

    let data = data_text(&contents);
    let assignments = match data_block(&data) {
        Ok((rest, assignments)) if rest.trim().is_empty() => assignments,
        Ok((rest, _)) => {
            super::errors::signal(
                "BADKERNELFILE",
                format!(
                    "Unparseable text in the data area of '{path}' near '{}'.",
                    rest.trim().chars().take(24).collect::<String>()
                ),
            );
            return;
        }
        Err(parse_error) => {
            super::errors::signal(
                "BADKERNELFILE",
                format!("Malformed data area in '{path}': {parse_error}."),
            );
            return;
        }
    };

    with_state(|state| {
        let new_handle = state.next_handle;

        let (segments, pool_assignments) = if kind == KernelKind::Ephemeris {
            match extract_segments(assignments, new_handle) {
                Ok(split) => split,
                Err(diagnostic) => {
                    state
                        .error
                        .signal("BADKERNELFILE", format!("In '{path}': {diagnostic}"));
                    return;
                }
            }
        } else {
            (Vec::new(), assignments)
        };

        let mut pool_names = Vec::new();
        for assignment in pool_assignments {
            let Some(entry) = entry_of(&assignment.values) else {
                state.error.signal(
                    "BADKERNELFILE",
                    format!(
                        "In '{path}': '{}' mixes numeric and text values.",
                        assignment.name
                    ),
                );
                return;
            };
            pool_names.push(assignment.name.clone());
            pool::merge(state, &assignment.name, entry, assignment.append);
            if state.error.failed() {
                return;
            }
        }

        state.segments.extend(segments);
        state.files.push(LoadedKernel {
            handle: new_handle,
            path: path.to_owned(),
            kind,
            pool_names,
        });
        state.next_handle += 1;
        *handle = new_handle;
    });
}

/// Unload one file by path. Unloading a file that is not in the table does
/// nothing. The file's ephemeris segments and the pool variables it
/// introduced are withdrawn.
pub(crate) fn unload(path: &str) {
    with_state(|state| {
        let Some(position) = state.files.iter().position(|file| file.path == path) else {
            return;
        };
        let file = state.files.remove(position);
        state
            .segments
            .retain(|segment| segment.handle != file.handle);
        for name in &file.pool_names {
            state.pool.remove(name);
        }
    });
}

/// Empty the file table, the segment table and the kernel pool.
pub(crate) fn unload_all() {
    with_state(unload_all_in);
}

pub(crate) fn unload_all_in(state: &mut ToolkitState) {
    state.files.clear();
    state.segments.clear();
    state.pool.clear();
    state.next_handle = 1;
}

/// Number of loaded kernels, optionally restricted to one kind.
pub(crate) fn count(filter: Option<KernelKind>) -> usize {
    with_state(|state| {
        state
            .files
            .iter()
            .filter(|file| filter.map_or(true, |kind| file.kind == kind))
            .count()
    })
}

/// Fetch the `index`-th loaded kernel (load order), optionally restricted to
/// one kind. Returns `false` when the index is past the end.
pub(crate) fn record(
    index: usize,
    filter: Option<KernelKind>,
    path: &mut String,
    kind: &mut KernelKind,
    handle: &mut i32,
) -> bool {
    with_state(|state| {
        match state
            .files
            .iter()
            .filter(|file| filter.map_or(true, |wanted| file.kind == wanted))
            .nth(index)
        {
            Some(file) => {
                *path = file.path.clone();
                *kind = file.kind;
                *handle = file.handle;
                true
            }
            None => false,
        }
    })
}
