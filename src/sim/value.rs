/// The state of a component output.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// Unknown. Gates never produce it from known inputs, it only enters through
    /// a stimulus or [`Sim::poke`](crate::Sim::poke).
    X,
    Bit(bool),
}

impl Value {
    pub fn is_x(&self) -> bool {
        *self == Value::X
    }

    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Value::X => None,
            Value::Bit(b) => Some(*b),
        }
    }

    /// Flips a known bit. An unknown value stays unknown.
    pub fn toggle(&self) -> Value {
        match self {
            Value::X => Value::X,
            Value::Bit(b) => Value::Bit(!b),
        }
    }

    /// The single character used in traces and dumps.
    pub fn to_char(&self) -> char {
        match self {
            Value::X => 'X',
            Value::Bit(false) => '0',
            Value::Bit(true) => '1',
        }
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Value {
        Value::Bit(x)
    }
}

impl TryFrom<Value> for bool {
    type Error = ();
    fn try_from(value: Value) -> Result<bool, Self::Error> {
        value.to_bool().ok_or(())
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_char())
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.to_char())
    }
}

#[test]
fn value_toggle() {
    assert_eq!(Value::Bit(false).toggle(), Value::Bit(true));
    assert_eq!(Value::Bit(true).toggle(), Value::Bit(false));
    assert_eq!(Value::X.toggle(), Value::X);
    assert_eq!(bool::try_from(Value::from(true)), Ok(true));
    assert_eq!(bool::try_from(Value::X), Err(()));
}
