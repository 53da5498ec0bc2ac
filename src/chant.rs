//! The multiplication chant (口诀): the smaller factor is spoken first,
//! then the larger one, then the product.

use crate::error::Result;
use crate::fact::Factor;

const DIGITS: [char; 10] = ['零', '一', '二', '三', '四', '五', '六', '七', '八', '九'];
const TEN: char = '十';
// Marks a single-digit product, e.g. 一二得二
const GETS: char = '得';

fn digit(n: u32) -> char {
    DIGITS[(n % 10) as usize]
}

/// Renders a product in 1..=81 the way the chant says it.
fn result_phrase(product: u32) -> String {
    let mut phrase = String::new();
    let (tens, units) = (product / 10, product % 10);

    if product < 10 {
        phrase.push(GETS);
        phrase.push(digit(units));
        return phrase;
    }

    // 十二 rather than 一十二
    if tens > 1 {
        phrase.push(digit(tens));
    }
    phrase.push(TEN);
    if units != 0 {
        phrase.push(digit(units));
    }
    phrase
}

/// Chant for a pair of factors. Order of the arguments does not matter.
pub fn chant(a: Factor, b: Factor) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let mut text = String::new();
    text.push(digit(lo.get()));
    text.push(digit(hi.get()));
    text.push_str(&result_phrase(lo.get() * hi.get()));
    text
}

/// Same as [`chant`], for callers holding plain integers.
pub fn format_chant(a: u32, b: u32) -> Result<String> {
    Ok(chant(Factor::new(a)?, Factor::new(b)?))
}

/// The 45 chants of the staircase table, one line per larger factor.
pub fn chant_table() -> String {
    Factor::all()
        .map(|hi| {
            Factor::all()
                .take_while(|lo| *lo <= hi)
                .map(|lo| chant(lo, hi))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors() -> impl Iterator<Item = (Factor, Factor)> {
        Factor::all().flat_map(|a| Factor::all().map(move |b| (a, b)))
    }

    fn value_of(c: char) -> u32 {
        DIGITS.iter().position(|d| *d == c).expect("not a digit") as u32
    }

    // Inverse of `result_phrase`, only for the shapes it produces.
    fn parse_result_phrase(phrase: &str) -> u32 {
        let chars = phrase.chars().collect::<Vec<_>>();
        match chars.as_slice() {
            [GETS, units] => value_of(*units),
            [TEN] => 10,
            [TEN, units] => 10 + value_of(*units),
            [tens, TEN] => value_of(*tens) * 10,
            [tens, TEN, units] => value_of(*tens) * 10 + value_of(*units),
            other => panic!("unexpected phrase {other:?}"),
        }
    }

    #[test]
    fn known_chants() {
        assert_eq!(format_chant(3, 4).unwrap(), "三四十二");
        assert_eq!(format_chant(7, 8).unwrap(), "七八五十六");
        assert_eq!(format_chant(5, 5).unwrap(), "五五二十五");
        assert_eq!(format_chant(9, 9).unwrap(), "九九八十一");
        assert_eq!(format_chant(1, 1).unwrap(), "一一得一");
        assert_eq!(format_chant(1, 9).unwrap(), "一九得九");
        assert_eq!(format_chant(2, 5).unwrap(), "二五十");
        assert_eq!(format_chant(4, 5).unwrap(), "四五二十");
        assert_eq!(format_chant(3, 3).unwrap(), "三三得九");
    }

    #[test]
    fn smaller_factor_is_spoken_first() {
        assert_eq!(format_chant(8, 7).unwrap(), "七八五十六");
        for (a, b) in factors() {
            assert_eq!(chant(a, b), chant(b, a));
        }
    }

    #[test]
    fn result_phrase_reads_back_as_the_product() {
        for (a, b) in factors() {
            let text = chant(a, b);
            let phrase = text.chars().skip(2).collect::<String>();
            assert_eq!(parse_result_phrase(&phrase), a.get() * b.get(), "{text}");
        }
    }

    #[test]
    fn gets_only_appears_for_single_digit_products() {
        for (a, b) in factors() {
            let text = chant(a, b);
            assert_eq!(text.contains(GETS), a.get() * b.get() < 10, "{text}");
            assert!(!text.contains('零'), "{text}");
        }
    }

    #[test]
    fn out_of_range_factors_are_an_error() {
        assert!(format_chant(0, 3).is_err());
        assert!(format_chant(3, 10).is_err());
    }

    #[test]
    fn table_has_a_staircase_of_45_chants() {
        let table = chant_table();
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "一一得一");
        assert_eq!(lines[1], "一二得二 二二得四");
        assert!(lines[8].ends_with("九九八十一"));
        assert_eq!(table.split_whitespace().count(), 45);
    }
}
