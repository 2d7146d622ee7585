use super::*;

#[test]
fn symbol_bits_round_trip() {
    for s in Symbol::ALL {
        let [hi, lo] = s.bits();
        assert_eq!(Symbol::from_bits(hi, lo), s);
    }
    assert_eq!(Symbol::S10.bits(), [true, false]);
    assert_eq!(Symbol::S01.bits(), [false, true]);
}

#[test]
fn colors_match_original_assignment() {
    assert_eq!(symbol_to_color(Symbol::S10), [255, 0, 0]);
    assert_eq!(symbol_to_color(Symbol::S11), [0, 255, 0]);
    assert_eq!(symbol_to_color(Symbol::S00), [0, 0, 255]);
    assert_eq!(symbol_to_color(Symbol::S01), [0, 0, 0]);
    assert_eq!(Symbol::FILLER, Symbol::S00);
}

#[test]
fn every_symbol_classifies_back_for_every_legal_tolerance() {
    for t in 1..=254u8 {
        for strict in [false, true] {
            let p = Palette::new(t, strict).unwrap();
            for s in Symbol::ALL {
                assert_eq!(p.classify(p.color(s)), Classification::Symbol(s), "t={t}");
            }
        }
    }
}

#[test]
fn extreme_tolerances_are_rejected() {
    assert!(Palette::new(0, false).is_err());
    assert!(Palette::new(255, false).is_err());
}

#[test]
fn transparent_pixels_are_reported() {
    let p = Palette::default();
    assert_eq!(p.classify([255, 0, 0, 0]), Classification::Transparent);
}

#[test]
fn near_colors_within_tolerance_still_classify() {
    let p = Palette::default();
    assert_eq!(
        p.classify([230, 20, 12, 255]),
        Classification::Symbol(Symbol::S10)
    );
    assert_eq!(
        p.classify([5, 200, 40, 255]),
        Classification::Symbol(Symbol::S11)
    );
    assert_eq!(
        p.classify([30, 30, 180, 255]),
        Classification::Symbol(Symbol::S00)
    );
}

#[test]
fn catch_all_depends_on_strictness() {
    let yellow = [255, 255, 0, 255];
    assert_eq!(
        Palette::new(150, false).unwrap().classify(yellow),
        Classification::Symbol(Symbol::S01)
    );
    assert_eq!(
        Palette::new(150, true).unwrap().classify(yellow),
        Classification::Ambiguous
    );
    // A channel sitting exactly on the threshold is neither on nor off.
    assert_eq!(
        Palette::new(150, true).unwrap().classify([150, 0, 0, 255]),
        Classification::Ambiguous
    );
}
