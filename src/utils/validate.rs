use regex::Regex;
use std::sync::OnceLock;

/// Pattern for standard algebraic notation: optional piece letter, optional
/// file and/or rank disambiguation, optional capture, destination square,
/// optional promotion and an optional check, mate or annotation suffix.
/// Castling is accepted on either side with the same suffix.
const NOTATION_PATTERN: &str =
    r"^(?:[KQRBNP]?[a-h]?[1-8]?x?[a-h][1-8](?:=[KQRBNP])?|O-O(?:-O)?)[+#!]?$";

/// Checks that the provided move text is valid chess notation. Only the
/// syntax is checked, the legality of the move is never considered.
///
/// `notation` The move text to check
pub fn is_valid_notation(notation: &str) -> bool {
    static NOTATION: OnceLock<Regex> = OnceLock::new();
    NOTATION
        .get_or_init(|| Regex::new(NOTATION_PATTERN).expect("Notation pattern failed to compile"))
        .is_match(notation)
}

#[cfg(test)]
mod test {
    use super::is_valid_notation;

    #[test]
    fn test_valid_notation() {
        let moves = [
            "e4", "Nf3", "O-O", "O-O-O#", "Qxe5+", "exd5", "Nbd7", "R1e2", "Qh4xe1",
            "e8=Q", "fxg1=N#", "Bb5!", "Pe4", "O-O+", "e8=K",
        ];
        for value in moves {
            assert!(is_valid_notation(value), "Rejected valid notation {value}");
        }
    }

    #[test]
    fn test_invalid_notation() {
        let moves = [
            "e9", "invalidNotation", "", "i4", "Xe4", "e4++", "O-O-O-O", "e8=X", "e8=", "0-0",
            " e4", "Nf3 ",
        ];
        for value in moves {
            assert!(!is_valid_notation(value), "Accepted invalid notation {value}");
        }
    }
}
