use crate::*;

fn keys(raw: &str) -> Vec<(&'static str, String)> {
    decompose(raw)
        .unwrap()
        .levels()
        .into_iter()
        .map(|(level, text)| (level.key(), text.to_string()))
        .collect()
}

fn pairs(expected: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
    expected
        .iter()
        .map(|(k, v)| (*k, v.to_string()))
        .collect()
}

#[test]
fn decompose_plain_numeral() {
    assert_eq!(keys("12"), pairs(&[("lvl1", "12")]));
    assert_eq!(
        decompose("12").unwrap(),
        HouseNumber::Plain {
            primary: "12".to_string()
        }
    );
}

#[test]
fn decompose_numeral_range() {
    assert_eq!(keys("12-14"), pairs(&[("lvl1", "12-14")]));
}

#[test]
fn decompose_letter_suffix() {
    assert_eq!(keys("12А"), pairs(&[("lvl1", "12"), ("lvl2c", "А")]));
    assert_eq!(keys("3-5ЖД"), pairs(&[("lvl1", "3-5"), ("lvl2c", "ЖД")]));
}

#[test]
fn decompose_fraction_with_letter() {
    assert_eq!(
        keys("12/3Б"),
        pairs(&[
            ("lvl1", "12"),
            ("lvl2_slash", "/"),
            ("lvl2s", "3"),
            ("lvl3", "Б")
        ])
    );
}

#[test]
fn decompose_fraction_without_letter_has_no_lvl3() {
    let parsed = decompose("12/3").unwrap();
    assert!(parsed.is_fraction());
    assert_eq!(parsed.get(Level::FractionSuffix), None);
    assert_eq!(parsed.get(Level::Slash), Some("/"));
    assert_eq!(parsed.get(Level::Denominator), Some("3"));
}

#[test]
fn decompose_block_suffix_keeps_marker_and_space() {
    assert_eq!(keys("12 к3"), pairs(&[("lvl1", "12"), ("lvl2c", " к3")]));
    assert!(matches!(
        decompose("12 к3").unwrap(),
        HouseNumber::Block { .. }
    ));
}

#[test]
fn decompose_rejects_unmatched_input() {
    for raw in ["", "А12", "012", "12а", "12/", "12/0", "12 к", "12 К3", "12-", " 12", "12 "] {
        let err = decompose(raw).unwrap_err();
        assert!(
            matches!(err, Error::InvalidHouseNumber { ref input } if input == raw),
            "expected InvalidHouseNumber for {raw:?}, got {err:?}"
        );
    }
}

#[test]
fn decompose_rejects_letters_outside_the_suffix_alphabet() {
    // The suffix alphabet is the contiguous uppercase block А..Я.
    assert!(decompose("12Ї").is_err());
    assert!(decompose("12A").is_err());
}

#[test]
fn decompose_arrow_numbers() {
    assert_eq!(
        decompose_arrow("5А").unwrap(),
        ArrowNumber {
            primary: "5".to_string(),
            letter: Some("А".to_string())
        }
    );
    assert_eq!(
        decompose_arrow("7").unwrap(),
        ArrowNumber {
            primary: "7".to_string(),
            letter: None
        }
    );
    assert_eq!(decompose_arrow("7-9БВ").unwrap().primary, "7-9");
}

#[test]
fn decompose_arrow_rejects_empty_and_non_digit_start() {
    for raw in ["", "А5", "5/1", "5 к1"] {
        assert!(
            matches!(decompose_arrow(raw), Err(Error::InvalidArrowNumber { .. })),
            "expected InvalidArrowNumber for {raw:?}"
        );
    }
}

#[test]
fn level_keys_are_stable() {
    assert_eq!(Level::Primary.key(), "lvl1");
    assert_eq!(Level::Slash.to_string(), "lvl2_slash");
    assert_eq!(Level::Suffix.key(), "lvl2c");
    assert_eq!(Level::Denominator.key(), "lvl2s");
    assert_eq!(Level::FractionSuffix.key(), "lvl3");
}
