use std::io::{Error, ErrorKind};

/// The four SEA concepts; each is a threshold on `a1 + a2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeaFunction {
    F1 = 1,
    F2 = 2,
    F3 = 3,
    F4 = 4,
}

impl SeaFunction {
    pub fn threshold(self) -> f64 {
        match self {
            SeaFunction::F1 => 8.0,
            SeaFunction::F2 => 9.0,
            SeaFunction::F3 => 7.0,
            SeaFunction::F4 => 9.5,
        }
    }
}

impl TryFrom<u8> for SeaFunction {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(SeaFunction::F1),
            2 => Ok(SeaFunction::F2),
            3 => Ok(SeaFunction::F3),
            4 => Ok(SeaFunction::F4),
            _ => Err(Error::new(
                ErrorKind::InvalidInput,
                "SEA function id must be in 1..=4",
            )),
        }
    }
}
