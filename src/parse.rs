use super::*;

use lalrpop_util::ParseError;
use lalrpop_util::lalrpop_mod;
lalrpop_mod!(grammar);

pub fn load_netlist_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Netlist, CircuitError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|err| CircuitError::Io(format!("Couldn't read netlist {}: {err}", path.display())))?;
    let source_info = SourceInfo::from_file(path, &text);
    netlist_from_string(source_info, &text)
}

pub fn load_netlist_from_string(text: &str) -> Result<Netlist, CircuitError> {
    let source_info = SourceInfo::from_string(text);
    netlist_from_string(source_info, text)
}

fn netlist_from_string(source_info: SourceInfo, text: &str) -> Result<Netlist, CircuitError> {
    let netlist = grammar::NetlistParser::new()
        .parse(&source_info, text)
        .map_err(|err| parse_error(&source_info, err))?;
    debug!("Parsed netlist with {} declarations", netlist.decls().len());
    Ok(netlist)
}

/// Converts a lalrpop error into a [`CircuitError::ParseError`] pointing at the offending span.
pub(crate) fn parse_error<T, E>(source_info: &SourceInfo, error: ParseError<usize, T, E>) -> CircuitError
where
    T: std::fmt::Display,
    E: std::fmt::Display,
{
    match error {
        ParseError::InvalidToken { location } => {
            let loc = Loc::from(source_info, location, location);
            CircuitError::ParseError(loc, "Invalid token".to_string())
        },
        ParseError::UnrecognizedEof { location, expected } => {
            let loc = Loc::from(source_info, location, location);
            CircuitError::ParseError(loc, format!("Unexpected end of input: expected one of {}", expected.join(" ")))
        },
        ParseError::UnrecognizedToken { token: (start, token, end), expected } => {
            let loc = Loc::from(source_info, start, end);
            CircuitError::ParseError(loc, format!("Unexpected {token}: expected one of {}", expected.join(" ")))
        },
        ParseError::ExtraToken { token: (start, token, end) } => {
            let loc = Loc::from(source_info, start, end);
            CircuitError::ParseError(loc, format!("Extra token {token}"))
        },
        ParseError::User { error } => CircuitError::ParseError(Loc::unknown(), error.to_string()),
    }
}
