//! CPF / CNPJ check-digit validation.

/// Keeps only ASCII digits.
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn to_numbers(digits: &str) -> Vec<u32> {
    digits.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(numbers: &[u32]) -> bool {
    numbers.windows(2).all(|w| w[0] == w[1])
}

/// Validates a CPF (formatted or bare).
pub fn validate_cpf(value: &str) -> bool {
    let numbers = to_numbers(&only_digits(value));
    if numbers.len() != 11 || all_same(&numbers) {
        return false;
    }

    let check = |len: usize| -> u32 {
        // weights run from len+1 down to 2
        let sum: u32 = numbers[..len]
            .iter()
            .enumerate()
            .map(|(i, n)| n * (len as u32 + 1 - i as u32))
            .sum();
        let rest = (sum * 10) % 11;
        if rest == 10 {
            0
        } else {
            rest
        }
    };

    check(9) == numbers[9] && check(10) == numbers[10]
}

/// Validates a CNPJ (formatted or bare).
pub fn validate_cnpj(value: &str) -> bool {
    let numbers = to_numbers(&only_digits(value));
    if numbers.len() != 14 || all_same(&numbers) {
        return false;
    }

    let check = |len: usize| -> u32 {
        // weights cycle 9..2, starting at len - 7
        let mut weight = len as u32 - 7;
        let mut sum = 0;
        for n in &numbers[..len] {
            sum += n * weight;
            weight = if weight == 2 { 9 } else { weight - 1 };
        }
        let rest = sum % 11;
        if rest < 2 {
            0
        } else {
            11 - rest
        }
    };

    check(12) == numbers[12] && check(13) == numbers[13]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf() {
        assert!(validate_cpf("52998224725"));
        assert!(validate_cpf("529.982.247-25"));
    }

    #[test]
    fn test_invalid_cpf() {
        assert!(!validate_cpf("52998224726"));
        assert!(!validate_cpf("52998224715"));
        assert!(!validate_cpf("11111111111"));
        assert!(!validate_cpf("00000000000"));
        assert!(!validate_cpf("5299822472"));
        assert!(!validate_cpf("529982247250"));
        assert!(!validate_cpf(""));
    }

    #[test]
    fn test_valid_cnpj() {
        assert!(validate_cnpj("11222333000181"));
        assert!(validate_cnpj("11.222.333/0001-81"));
    }

    #[test]
    fn test_invalid_cnpj() {
        assert!(!validate_cnpj("11222333000182"));
        assert!(!validate_cnpj("11222333000191"));
        assert!(!validate_cnpj("11111111111111"));
        assert!(!validate_cnpj("1122233300018"));
        assert!(!validate_cnpj("52998224725"));
    }
}
