use conecta_funerarias::core::rut::{clean, compute_check, format, validate};
use conecta_funerarias::utils::validation::validate_rut;
use conecta_funerarias::Rut;

#[test]
fn test_documented_vectors() {
    assert_eq!(compute_check(7654321), '6');
    assert!(validate("7654321-6"));
    assert!(!validate("7654321-5"));
    assert_eq!(format("76543216"), "7.654.321-6");
    assert_eq!(clean("7.654.321-6"), "76543216");
}

#[test]
fn test_every_accepted_spelling_of_the_same_rut() {
    for input in [
        "12.345.678-5",
        "12345678-5",
        "123456785",
        "12.345.6785",
        " 12 345 678 - 5 ",
    ] {
        assert!(validate(input), "{} should be valid", input);
        assert_eq!(format(input), "12.345.678-5");
    }
}

#[test]
fn test_lowercase_k_is_accepted() {
    assert!(validate("6.123.456-k"));
    assert_eq!(format("6123456k"), "6.123.456-K");
    assert_eq!("6123456-k".parse::<Rut>().unwrap().to_string(), "6.123.456-K");
}

#[test]
fn test_generated_ruts_round_trip_through_format_and_validate() {
    for digits in (1_000_000..99_999_999u32).step_by(7_919_731) {
        let rut = Rut::new(digits);
        assert!(validate(&rut.compact()));
        assert!(validate(&rut.to_string()));
        assert_eq!(validate_rut("rut", &format(&rut.compact())).unwrap(), rut);
    }
}

#[test]
fn test_total_over_garbage() {
    for input in ["", "K", "kkkk", "🙂", "12.345.678-5-5", "-5", "..."] {
        let _ = validate(input);
        let _ = format(input);
        let _ = clean(input);
    }
    assert_eq!(format("K"), "K");
    assert_eq!(clean("🙂12k"), "12K");
}
