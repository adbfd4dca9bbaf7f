use super::ScalarError;

/// Binary unit suffix accepted after a size magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Bytes,
    Kibi,
    Mebi,
    Gibi,
    Tebi,
}

impl SizeUnit {
    /// Map a suffix letter (case-insensitive) to its unit
    #[must_use]
    pub const fn from_suffix(suffix: char) -> Option<Self> {
        match suffix {
            'k' | 'K' => Some(Self::Kibi),
            'm' | 'M' => Some(Self::Mebi),
            'g' | 'G' => Some(Self::Gibi),
            't' | 'T' => Some(Self::Tebi),
            _ => None,
        }
    }

    #[must_use]
    pub const fn multiplier(self) -> u64 {
        match self {
            Self::Bytes => 1,
            Self::Kibi => 1 << 10,
            Self::Mebi => 1 << 20,
            Self::Gibi => 1 << 30,
            Self::Tebi => 1 << 40,
        }
    }
}

/// A parsed size such as `10m`: a magnitude plus its unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    pub magnitude: u64,
    pub unit: SizeUnit,
}

impl SizeSpec {
    /// Byte count, or `None` if it does not fit in a `u64`
    #[must_use]
    pub const fn bytes(self) -> Option<u64> {
        self.magnitude.checked_mul(self.unit.multiplier())
    }
}

impl TryFrom<&str> for SizeSpec {
    type Error = ScalarError;

    /// Parse `<digits>[k|m|g|t]`
    ///
    /// # Examples
    /// ```
    /// use mfd::scalar::{SizeSpec, SizeUnit};
    ///
    /// let spec = SizeSpec::try_from("10M").unwrap();
    /// assert_eq!(spec, SizeSpec { magnitude: 10, unit: SizeUnit::Mebi });
    /// ```
    fn try_from(input: &str) -> Result<Self, Self::Error> {
        let malformed = || ScalarError::MalformedSizeSpec(input.to_string());

        let (digits, unit) = match input.char_indices().next_back() {
            None => return Err(malformed()),
            Some((_, last)) if last.is_ascii_digit() => (input, SizeUnit::Bytes),
            Some((idx, last)) => {
                let unit = SizeUnit::from_suffix(last).ok_or_else(malformed)?;
                (&input[..idx], unit)
            }
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let magnitude = digits.parse::<u64>().map_err(|_| malformed())?;
        Ok(Self { magnitude, unit })
    }
}

/// Normalize a human size (`4096`, `10k`, `1G`) into a byte count
///
/// # Errors
/// Returns `ScalarError::MalformedSizeSpec` when the input has no digit run,
/// carries an unknown suffix, or overflows.
pub fn normalize_size(input: &str) -> Result<u64, ScalarError> {
    let spec = SizeSpec::try_from(input)?;
    let bytes = spec
        .bytes()
        .ok_or_else(|| ScalarError::MalformedSizeSpec(input.to_string()))?;

    tracing::debug!(
        input,
        bytes,
        human = %byte_unit::Byte::from_u64(bytes).get_appropriate_unit(byte_unit::UnitType::Binary),
        "normalized size"
    );

    Ok(bytes)
}
