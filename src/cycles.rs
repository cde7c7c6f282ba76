use std::fmt;

use serde::Serialize;

use crate::error::Error;

// Raw tables count machine clocks. Instruction cycles are four clocks each.
pub const RAW_CLOCKS_PER_CYCLE: u16 = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CycleSpec {
    Fixed { value: u16 },
    Variable { min: u16, max: u16 },
}

impl From<u16> for CycleSpec {
    fn from(value: u16) -> Self {
        CycleSpec::Fixed { value }
    }
}

impl From<(u16, u16)> for CycleSpec {
    fn from((min, max): (u16, u16)) -> Self {
        CycleSpec::Variable { min, max }
    }
}

/// Succeeds only for [`CycleSpec::Fixed`]. Convenient for instructions that never branch.
impl TryFrom<CycleSpec> for u16 {
    type Error = CycleSpec;

    fn try_from(spec: CycleSpec) -> Result<Self, Self::Error> {
        match spec {
            CycleSpec::Fixed { value } => Ok(value),
            variable => Err(variable),
        }
    }
}

/// Succeeds only for [`CycleSpec::Variable`], yielding `(min, max)`.
impl TryFrom<CycleSpec> for (u16, u16) {
    type Error = CycleSpec;

    fn try_from(spec: CycleSpec) -> Result<Self, Self::Error> {
        match spec {
            CycleSpec::Variable { min, max } => Ok((min, max)),
            fixed => Err(fixed),
        }
    }
}

// The canonical cell text. The normalizer writes exactly this.
impl fmt::Display for CycleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleSpec::Fixed { value } => write!(f, "{value}"),
            CycleSpec::Variable { min, max } => write!(f, "{min}/{max}"),
        }
    }
}

/// The order in which a table stores the two halves of a dual-cycle cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CycleOrder {
    /// Branch taken first, e.g. "12/8". This is how the raw tables are written.
    HighLow,
    /// Already normalized: "2/3".
    LowHigh,
}

/// How to read the cycles token of a cell: what to divide by, which half comes first, and
/// whether a remainder is an error or gets truncated away.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CycleFormat {
    divisor: u16,
    order: CycleOrder,
    strict: bool,
}

impl CycleFormat {
    pub const RAW: CycleFormat =
        CycleFormat { divisor: RAW_CLOCKS_PER_CYCLE, order: CycleOrder::HighLow, strict: false };
    pub const SIMPLIFIED: CycleFormat =
        CycleFormat { divisor: 1, order: CycleOrder::LowHigh, strict: false };

    pub fn new(divisor: u16, simplified: bool, strict: bool) -> Result<CycleFormat, Error> {
        if divisor == 0 {
            return Err(Error::ZeroDivisor);
        }

        let order = if simplified { CycleOrder::LowHigh } else { CycleOrder::HighLow };
        Ok(CycleFormat { divisor, order, strict })
    }

    pub fn strict(self) -> CycleFormat {
        CycleFormat { strict: true, ..self }
    }

    pub fn divisor(self) -> u16 {
        self.divisor
    }

    pub fn order(self) -> CycleOrder {
        self.order
    }

    pub fn is_strict(self) -> bool {
        self.strict
    }

    pub fn parse(self, token: &str) -> Result<CycleSpec, CycleError> {
        let Some((first, second)) = token.split_once('/') else {
            return Ok(CycleSpec::Fixed { value: self.scale(parse_count(token)?)? });
        };

        let first = self.scale(parse_count(first)?)?;
        let second = self.scale(parse_count(second)?)?;
        let (min, max) = match self.order {
            CycleOrder::HighLow => (second, first),
            CycleOrder::LowHigh => (first, second),
        };

        if min > max {
            return Err(CycleError::Inverted { min, max });
        }

        Ok(CycleSpec::Variable { min, max })
    }

    fn scale(self, value: u16) -> Result<u16, CycleError> {
        if self.strict && value % self.divisor != 0 {
            return Err(CycleError::Indivisible { value, divisor: self.divisor });
        }

        Ok(value / self.divisor)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CycleError {
    NotANumber(String),
    Inverted { min: u16, max: u16 },
    Indivisible { value: u16, divisor: u16 },
}

impl CycleError {
    pub fn at(self, table: usize, opcode: u8) -> Error {
        match self {
            CycleError::NotANumber(text) =>
                Error::malformed(table, opcode, format!("cycle count '{text}' is not a number.")),
            CycleError::Inverted { min, max } =>
                Error::malformed(table, opcode, format!("cycle range {min}/{max} has its minimum above its maximum.")),
            CycleError::Indivisible { value, divisor } =>
                Error::Divisor { table, opcode, value, divisor },
        }
    }
}

fn parse_count(text: &str) -> Result<u16, CycleError> {
    let text = text.trim();
    text.parse().map_err(|_| CycleError::NotANumber(text.to_string()))
}
