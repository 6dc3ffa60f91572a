use crate::error::SimplexError;
use crate::problem::{Problem, VariableId};

use nom::bytes::complete::take_till1;
use nom::character::complete::{not_line_ending, one_of, space0, space1};
use nom::combinator::{all_consuming, opt};
use nom::multi::separated_list1;
use nom::number::complete::double;
use nom::sequence::{preceded, separated_pair, terminated, tuple};
use nom::IResult;

use log::{debug, error};

use std::collections::HashMap;
use std::convert::TryFrom;

impl std::convert::TryFrom<&str> for Problem {
    type Error = SimplexError;

    fn try_from(mps: &str) -> Result<Self, Self::Error> {
        parse_mps(mps)
    }
}

impl std::convert::TryFrom<&[u8]> for Problem {
    type Error = SimplexError;

    fn try_from(mps: &[u8]) -> Result<Self, Self::Error> {
        let mps = std::str::from_utf8(mps)
            .map_err(|err| SimplexError::new(format!("mps input is not utf-8: {}", err)))?;

        Problem::try_from(mps)
    }
}

/// Reads a fixed or free format MPS model restricted to `≤` rows and
/// nonnegative columns.
///
/// MPS objectives are minimized unless `OBJSENSE` says otherwise; a minimized
/// objective `cᵀx` is returned as the equivalent `max -cᵀx`.
pub fn parse_mps(mps: &str) -> Result<Problem, SimplexError> {
    let mut section = Section::Preamble;
    let mut maximize = false;
    let mut objective: Option<&str> = None;

    let mut rows: HashMap<&str, usize> = HashMap::new();
    let mut row_coeffs: Vec<Vec<(usize, f64)>> = Vec::new();
    let mut rhs: Vec<Option<f64>> = Vec::new();

    let mut col_ids: HashMap<&str, usize> = HashMap::new();
    let mut cols: Vec<Col> = Vec::new();

    for (line_no, line) in mps.lines().enumerate().map(|(i, line)| (i + 1, line)) {
        let fail = |msg: String| {
            error!("mps line {}: {}", line_no, msg);
            SimplexError::new(format!("mps line {}: {}", line_no, msg))
        };

        if line.trim().is_empty() || line.trim_start().starts_with('*') {
            continue;
        }

        if !line.starts_with(char::is_whitespace) {
            let (keyword, rest) = parse_line(header, line)
                .ok_or_else(|| fail(format!("invalid section header: {:?}", line)))?;

            section = match keyword {
                "NAME" => Section::Preamble,
                "OBJSENSE" => match rest {
                    Some(sense) => {
                        maximize = parse_sense(sense)
                            .ok_or_else(|| fail(format!("invalid objective sense: {}", sense)))?;
                        Section::Preamble
                    }
                    None => Section::ObjSense,
                },
                "ROWS" => Section::Rows,
                "COLUMNS" => Section::Columns,
                "RHS" => Section::Rhs,
                "BOUNDS" => Section::Bounds,
                "ENDATA" => break,
                "RANGES" => return Err(fail("RANGES are not supported".to_string())),
                _ => return Err(fail(format!("unknown section: {}", keyword))),
            };

            continue;
        }

        match section {
            Section::Preamble => {
                return Err(fail(format!("data outside of a section: {:?}", line)));
            }

            Section::ObjSense => {
                let sense = line.trim();
                maximize = parse_sense(sense)
                    .ok_or_else(|| fail(format!("invalid objective sense: {}", sense)))?;
                section = Section::Preamble;
            }

            Section::Rows => {
                let (kind, name) = parse_line(row_line, line)
                    .ok_or_else(|| fail(format!("invalid row: {:?}", line)))?;

                match kind {
                    'N' => {
                        if objective.is_none() {
                            objective = Some(name);
                        } else {
                            debug!("ignoring additional objective row {}", name);
                        }
                    }

                    'L' => {
                        if rows.insert(name, row_coeffs.len()).is_some() {
                            return Err(fail(format!("row {} declared more than once", name)));
                        }

                        row_coeffs.push(Vec::new());
                        rhs.push(None);
                    }

                    _ => {
                        return Err(fail(format!(
                            "row {} has type {}, only L rows are supported",
                            name, kind
                        )))
                    }
                }
            }

            Section::Columns => {
                let (col_name, entries) = parse_line(entry_line, line)
                    .ok_or_else(|| fail(format!("invalid column entry: {:?}", line)))?;

                let next_id = cols.len();
                let col = *col_ids.entry(col_name).or_insert(next_id);

                if col == cols.len() {
                    cols.push(Col {
                        name: col_name,
                        obj_coeff: None,
                    });
                }

                for (row_name, coeff) in entries {
                    if Some(row_name) == objective {
                        if cols[col].obj_coeff.replace(coeff).is_some() {
                            return Err(fail(format!(
                                "specified objective coefficient for {} more than once",
                                col_name
                            )));
                        }
                    } else if let Some(&row) = rows.get(row_name) {
                        if row_coeffs[row].iter().any(|&(j, _)| j == col) {
                            return Err(fail(format!(
                                "specified coefficient of {} in {} more than once",
                                col_name, row_name
                            )));
                        }

                        row_coeffs[row].push((col, coeff));
                    } else {
                        return Err(fail(format!("unknown row: {}", row_name)));
                    }
                }
            }

            Section::Rhs => {
                let (_set_name, entries) = parse_line(entry_line, line)
                    .ok_or_else(|| fail(format!("invalid rhs entry: {:?}", line)))?;

                for (row_name, value) in entries {
                    if Some(row_name) == objective {
                        return Err(fail("should not specify a rhs for the objective".to_string()));
                    }

                    match rows.get(row_name) {
                        Some(&row) => {
                            if rhs[row].replace(value).is_some() {
                                return Err(fail(format!(
                                    "specified rhs for {} more than once",
                                    row_name
                                )));
                            }
                        }

                        None => return Err(fail(format!("unknown row: {}", row_name))),
                    }
                }
            }

            Section::Bounds => {
                let (kind, _set_name, col_name, value) = parse_line(bound_line, line)
                    .ok_or_else(|| fail(format!("invalid bound: {:?}", line)))?;

                if !col_ids.contains_key(col_name) {
                    return Err(fail(format!(
                        "found bound for {}, but that column does not exist",
                        col_name
                    )));
                }

                match (kind, value) {
                    ("PL", _) => (),
                    ("LO", Some(lb)) if lb == 0. => (),
                    _ => {
                        return Err(fail(format!(
                            "unsupported bound {} for {}, columns must be nonnegative",
                            kind, col_name
                        )))
                    }
                }
            }
        }
    }

    let sign = if maximize { 1. } else { -1. };
    let mut prob = Problem::new();

    let ids = cols
        .iter()
        .map(|col| prob.add_var(sign * col.obj_coeff.unwrap_or(0.), Some(col.name.to_string())))
        .collect::<Result<Vec<VariableId>, _>>()?;

    for (coeffs, rhs) in row_coeffs.into_iter().zip(rhs) {
        let coeffs = coeffs.into_iter().map(|(j, coeff)| (ids[j], coeff)).collect();
        prob.add_constraint(coeffs, rhs.unwrap_or(0.))?;
    }

    debug!(
        "read mps model with {} columns and {} rows",
        prob.vars().len(),
        prob.constraints().len()
    );

    Ok(prob)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    ObjSense,
    Rows,
    Columns,
    Rhs,
    Bounds,
}

#[derive(Debug, Clone)]
struct Col<'a> {
    name: &'a str,
    obj_coeff: Option<f64>,
}

fn parse_line<'a, T>(parser: fn(&'a str) -> IResult<&'a str, T>, line: &'a str) -> Option<T> {
    all_consuming(terminated(parser, space0))(line)
        .ok()
        .map(|(_, parsed)| parsed)
}

fn parse_sense(sense: &str) -> Option<bool> {
    match sense.trim() {
        "MAX" | "MAXIMIZE" => Some(true),
        "MIN" | "MINIMIZE" => Some(false),
        _ => None,
    }
}

fn token(i: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(i)
}

fn header(i: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (i, keyword) = token(i)?;
    let (i, rest) = opt(preceded(space1, not_line_ending))(i)?;
    Ok((i, (keyword, rest.map(str::trim).filter(|rest| !rest.is_empty()))))
}

fn row_line(i: &str) -> IResult<&str, (char, &str)> {
    let (i, _ws) = space0(i)?;
    separated_pair(one_of("NLGE"), space1, token)(i)
}

fn entry(i: &str) -> IResult<&str, (&str, f64)> {
    separated_pair(token, space1, double)(i)
}

fn entry_line(i: &str) -> IResult<&str, (&str, Vec<(&str, f64)>)> {
    let (i, _ws) = space0(i)?;
    let (i, name) = token(i)?;
    let (i, _ws) = space1(i)?;
    let (i, entries) = separated_list1(space1, entry)(i)?;
    Ok((i, (name, entries)))
}

fn bound_line(i: &str) -> IResult<&str, (&str, &str, &str, Option<f64>)> {
    let (i, (_ws, kind, _, set_name, _, col_name)) =
        tuple((space0, token, space1, token, space1, token))(i)?;
    let (i, value) = opt(preceded(space1, double))(i)?;
    Ok((i, (kind, set_name, col_name, value)))
}
