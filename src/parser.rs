//! This module provides the parser for machine definitions, utilizing the
//! `pest` crate. It defines functions to parse the record-oriented `.ntm`
//! format into a [`MachineSpec`].

use crate::{
    analyzer::analyze,
    types::{Direction, MachineSpec, NtmError, RuleRecord, MAX_DEFINITION_SIZE},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Number of header records before the transition rules begin: name, states,
/// input alphabet, tape alphabet, start state, accept state, reject state.
const HEADER_RECORDS: usize = 7;
/// Fields in a transition record: from state, read, to state, write, direction.
const RULE_ARITY: usize = 5;

/// Derives a `PestParser` for the machine definition grammar in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct MachineDefinitionParser;

/// Parses the given input string into a [`MachineSpec`].
///
/// This is the main entry point for parsing machine definitions. It trims the
/// input, parses it with the `MachineDefinitionParser`, assigns the records to
/// their declared roles, and validates the resulting spec before returning it.
///
/// # Returns
///
/// * `Ok(MachineSpec)` if the input is successfully parsed and validated.
/// * `Err(NtmError::ParseError)` if there are any syntax errors.
/// * `Err(NtmError::ValidationError)` if the definition fails validation.
pub fn parse(input: &str) -> Result<MachineSpec, NtmError> {
    if input.len() > MAX_DEFINITION_SIZE {
        return Err(NtmError::ValidationError(format!(
            "Machine definition exceeds maximum size of {} bytes",
            MAX_DEFINITION_SIZE
        )));
    }

    let root = MachineDefinitionParser::parse(Rule::machine, input.trim())
        .map_err(|e| NtmError::ParseError(Box::new(e)))?
        .next()
        .unwrap();

    let spec = parse_machine(root)?;

    // Validate the parsed definition
    analyze(&spec)?;

    Ok(spec)
}

/// Assigns the parsed records to their declared roles and builds the spec.
fn parse_machine(pair: Pair<Rule>) -> Result<MachineSpec, NtmError> {
    let records: Vec<Pair<Rule>> = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::record)
        .collect();

    if records.len() < HEADER_RECORDS {
        return Err(NtmError::ValidationError(format!(
            "Machine definition requires {} header records (name, states, input \
             alphabet, tape alphabet, start, accept, reject), found {}",
            HEADER_RECORDS,
            records.len()
        )));
    }

    let mut remaining = records.into_iter();
    let name = parse_single_field(remaining.next().unwrap())?;
    let states = parse_fields(remaining.next().unwrap());
    let input_alphabet = parse_symbol_record(remaining.next().unwrap())?;
    let tape_alphabet = parse_symbol_record(remaining.next().unwrap())?;
    let start_state = parse_single_field(remaining.next().unwrap())?;
    let accept_state = parse_single_field(remaining.next().unwrap())?;
    let reject_state = parse_single_field(remaining.next().unwrap())?;

    // Every record after the header is a transition rule.
    let rules = remaining
        .map(parse_rule_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MachineSpec {
        name,
        states,
        input_alphabet,
        tape_alphabet,
        start_state,
        accept_state,
        reject_state,
        rules,
    })
}

/// Parses a transition record of the form
/// `from_state, read, to_state, write, direction`.
fn parse_rule_record(pair: Pair<Rule>) -> Result<RuleRecord, NtmError> {
    let span = pair.as_span();
    let fields = field_pairs(pair);

    if fields.len() != RULE_ARITY {
        return Err(parse_error(
            &format!(
                "Transition rule must have {} fields (from, read, to, write, direction), found {}",
                RULE_ARITY,
                fields.len()
            ),
            span,
        ));
    }

    Ok(RuleRecord {
        from_state: fields[0].as_str().trim().to_string(),
        read: parse_symbol(&fields[1])?,
        to_state: fields[2].as_str().trim().to_string(),
        write: parse_symbol(&fields[3])?,
        direction: parse_direction(&fields[4])?,
    })
}

/// Parses a single direction field. Supports `L` for Left and `R` for Right.
fn parse_direction(pair: &Pair<Rule>) -> Result<Direction, NtmError> {
    match pair.as_str().trim() {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        other => Err(parse_error(
            &format!("Unsupported direction: {other}"),
            pair.as_span(),
        )),
    }
}

/// Parses a field that must contain exactly one character.
fn parse_symbol(pair: &Pair<Rule>) -> Result<char, NtmError> {
    let text = pair.as_str().trim();
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(parse_error(
            &format!("Expected a single-character symbol, found \"{text}\""),
            pair.as_span(),
        )),
    }
}

/// Parses a record whose fields are all single-character symbols.
fn parse_symbol_record(pair: Pair<Rule>) -> Result<Vec<char>, NtmError> {
    field_pairs(pair).iter().map(parse_symbol).collect()
}

/// Parses a record that must contain exactly one field, e.g. the machine name
/// or one of the scalar state declarations.
fn parse_single_field(pair: Pair<Rule>) -> Result<String, NtmError> {
    let span = pair.as_span();
    let fields = parse_fields(pair);
    match fields.as_slice() {
        [value] => Ok(value.clone()),
        _ => Err(parse_error(
            &format!("Expected a single value, found {} fields", fields.len()),
            span,
        )),
    }
}

/// Collects the trimmed field texts of a record.
fn parse_fields(pair: Pair<Rule>) -> Vec<String> {
    field_pairs(pair)
        .iter()
        .map(|f| f.as_str().trim().to_string())
        .collect()
}

/// Collects the field pairs of a record.
fn field_pairs(pair: Pair<Rule>) -> Vec<Pair<Rule>> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::field)
        .collect()
}

/// Creates an `NtmError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> NtmError {
    NtmError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}
