//! BBAN Generation
//!
//! Country layouts (digits only):
//!
//! | Country | Bank part | Account part |
//! |---------|-----------|--------------|
//! | DE      | 8         | 10           |
//! | AT      | 5         | 11           |
//! | PL      | 8 (last is a check digit) | 16 |

use rand::Rng;

use super::country::Country;

/// Weights of the Polish sort-code check digit
const PL_SORT_CODE_WEIGHTS: [u32; 7] = [3, 9, 7, 1, 3, 9, 7];

/// Generate a BBAN for `country` using `rng`
pub fn generate_bban<R: Rng + ?Sized>(country: Country, rng: &mut R) -> String {
    match country {
        Country::De => {
            let mut bban = random_digits(rng, 8);
            bban.push_str(&random_digits(rng, 10));
            bban
        }
        Country::At => {
            let mut bban = random_digits(rng, 5);
            bban.push_str(&random_digits(rng, 11));
            bban
        }
        Country::Pl => {
            let mut bban = random_digits(rng, 7);
            let check = pl_sort_code_check_digit(&bban);
            bban.push(char::from(b'0' + check));
            bban.push_str(&random_digits(rng, 16));
            bban
        }
    }
}

/// Check digit for the first seven digits of a Polish sort code
pub fn pl_sort_code_check_digit(first_seven: &str) -> u8 {
    let sum: u32 = first_seven
        .chars()
        .filter_map(|c| c.to_digit(10))
        .zip(PL_SORT_CODE_WEIGHTS)
        .map(|(digit, weight)| digit * weight)
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn random_digits<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bban_lengths_and_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for country in Country::ALL {
            for _ in 0..50 {
                let bban = generate_bban(country, &mut rng);
                assert_eq!(bban.len(), country.bban_length());
                assert!(bban.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn test_pl_sort_code_check_digit() {
        // 1090 1014 is a real sort code (check digit 4)
        assert_eq!(pl_sort_code_check_digit("1090101"), 4);
        assert_eq!(pl_sort_code_check_digit("0000000"), 0);
    }

    #[test]
    fn test_pl_bban_carries_sort_code_check_digit() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let bban = generate_bban(Country::Pl, &mut rng);
            let expected = pl_sort_code_check_digit(&bban[..7]);
            assert_eq!(bban.as_bytes()[7] - b'0', expected);
        }
    }
}
