//! Brazilian CPF checksum.
//!
//! A CPF is eleven digits, the last two being check digits computed modulo 11
//! over the preceding ones. Formatting characters (`.`, `-`, spaces) are
//! ignored.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CpfError {
    #[error("CPF must have 11 digits, got {0}")]
    Length(usize),

    #[error("CPF digits are all the same")]
    RepeatedDigits,

    #[error("First check digit does not match")]
    FirstCheckDigit,

    #[error("Second check digit does not match")]
    SecondCheckDigit,
}

/// Returns the bare eleven digits when the checksum holds.
pub fn validate_cpf(cpf: &str) -> Result<String, CpfError> {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return Err(CpfError::Length(digits.len()));
    }

    if digits.iter().all(|d| *d == digits[0]) {
        return Err(CpfError::RepeatedDigits);
    }

    if check_digit(&digits[..9]) != digits[9] {
        return Err(CpfError::FirstCheckDigit);
    }

    if check_digit(&digits[..10]) != digits[10] {
        return Err(CpfError::SecondCheckDigit);
    }

    Ok(digits.iter().map(|d| char::from(b'0' + *d as u8)).collect())
}

// Weights run from len + 1 down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        remainder => remainder,
    }
}

#[cfg(test)]
mod tests {
    use crate::lookup::cpf::{CpfError, validate_cpf};

    #[test]
    fn accepts_valid_numbers_with_or_without_formatting() {
        assert_eq!(validate_cpf("52998224725").unwrap(), "52998224725");
        assert_eq!(validate_cpf("529.982.247-25").unwrap(), "52998224725");
        assert!(validate_cpf("80713245077").is_ok());
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert_eq!(validate_cpf("5299822472"), Err(CpfError::Length(10)));
        assert_eq!(validate_cpf(""), Err(CpfError::Length(0)));
        assert_eq!(validate_cpf("529982247250"), Err(CpfError::Length(12)));
    }

    #[test]
    fn rejects_repeated_digits_even_though_their_checksum_holds() {
        assert_eq!(validate_cpf("111.111.111-11"), Err(CpfError::RepeatedDigits));
        assert_eq!(validate_cpf("00000000000"), Err(CpfError::RepeatedDigits));
    }

    #[test]
    fn reports_which_check_digit_failed() {
        assert_eq!(validate_cpf("52998224715"), Err(CpfError::FirstCheckDigit));
        assert_eq!(validate_cpf("52998224724"), Err(CpfError::SecondCheckDigit));
        assert_eq!(validate_cpf("44577744058"), Err(CpfError::SecondCheckDigit));
    }
}
