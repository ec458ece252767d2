pub mod calculate;

use image::Rgb;

use crate::error::PResult;
use crate::error::PhantomError;


/// Parse `#RGB` or `#RRGGBB` (case-insensitive) into a color.
pub fn parse_hex_color(s: &str) -> PResult<Rgb<u8>> {
    let invalid = || PhantomError::InvalidColor(s.to_string());

    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let digits: Vec<u8> = hex.chars().filter_map(|c| c.to_digit(16)).map(|d| d as u8).collect();
    match digits.len() {
        3 => Ok(Rgb::from([
            digits[0] * 17,
            digits[1] * 17,
            digits[2] * 17,
        ])),
        6 => Ok(Rgb::from([
            (digits[0] << 4) | digits[1],
            (digits[2] << 4) | digits[3],
            (digits[4] << 4) | digits[5],
        ])),
        _ => Err(invalid())
    }
}


#[cfg(test)]
mod test {

    use image::Rgb;

    use super::parse_hex_color;
    use crate::error::PhantomError;

    #[test]
    fn test_short_and_long_form() {
        assert_eq!(parse_hex_color("#FFF").unwrap(), Rgb::from([255, 255, 255]));
        assert_eq!(parse_hex_color("#FFFFFF").unwrap(), Rgb::from([255, 255, 255]));
        assert_eq!(parse_hex_color("#000").unwrap(), Rgb::from([0, 0, 0]));
        assert_eq!(parse_hex_color("#1a2B3c").unwrap(), Rgb::from([0x1a, 0x2b, 0x3c]));
        assert_eq!(parse_hex_color("#f80").unwrap(), Rgb::from([0xff, 0x88, 0x00]));
    }

    #[test]
    fn test_rejected() {
        for input in &[
            "notacolor",
            "FFFFFF",
            "#",
            "#FF",
            "#FFFF",
            "#FFFFF",
            "#FFFFFFF",
            "#GGGGGG",
            "#+1+1+1",
            "",
        ] {
            match parse_hex_color(input) {
                Err(PhantomError::InvalidColor(s)) => assert_eq!(&s, input),
                other => panic!("`{}` should be rejected, got {:?}", input, other),
            }
        }
    }
}
