use super::*;

#[test]
fn len_and_empty() {
    assert_eq!(Span::new(3, 7).len(), 4);
    assert!(Span::new(5, 5).is_empty());
    assert!(!Span::new(0, 1).is_empty());
}

#[test]
fn slices_source() {
    let source = "ab[Größe]";
    let span = Span::new(2, 11);
    assert_eq!(&source[span.to_range()], "[Größe]");
}

#[test]
fn debug_format() {
    assert_eq!(format!("{:?}", Span::new(1, 4)), "1..4");
}
