use super::*;

#[derive(Debug, Clone)]
pub enum CircuitError {
    ParseError(Loc, String),
    UnknownComponent(Loc, String),
    DuplicateComponent(Loc, String),
    NotControlled(String),
    Io(String),
}

impl std::fmt::Display for CircuitError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CircuitError::ParseError(loc, message) => write!(f, "Parse error at {loc}: {message}"),
            CircuitError::UnknownComponent(loc, name) => write!(f, "No such component: {name} (referenced at {loc})"),
            CircuitError::DuplicateComponent(loc, name) => write!(f, "Duplicate component: {name} (redeclared at {loc})"),
            CircuitError::NotControlled(name) => write!(f, "Component is not controlled and cannot be driven externally: {name}"),
            CircuitError::Io(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for CircuitError {}

impl HasLoc for CircuitError {
    fn loc(&self) -> Loc {
        match self {
            CircuitError::ParseError(loc, _message) => loc.clone(),
            CircuitError::UnknownComponent(loc, _name) => loc.clone(),
            CircuitError::DuplicateComponent(loc, _name) => loc.clone(),
            CircuitError::NotControlled(_name) => Loc::unknown(),
            CircuitError::Io(_message) => Loc::unknown(),
        }
    }
}
