use crate::blocks::Predicate;
use crate::error::{ParseError, PuzzleError};
use crate::puzzle::PuzzleState;

/// Parses a puzzle configuration from text.
///
/// Every character other than whitespace and commas is one tile, so
/// `"123456078"`, `"1 2 3 4 5 6 0 7 8"` and `"1,2,3\n4,5,6\n0,7,8"` are all
/// the same board. The blank may be written `0` or `_`.
///
/// # Returns
/// * `Ok(PuzzleState)` for a valid permutation of `0..=8`.
/// * `Err(PuzzleError::InvalidToken)` for a character that is not a tile.
/// * Any validation error from [`PuzzleState::from_slice`] (wrong length,
///   duplicates, out-of-range tiles).
///
/// # Examples
/// ```
/// use ai_search::puzzle::PuzzleState;
/// use ai_search::utils::puzzle_from_str;
///
/// let a = puzzle_from_str("123456078").unwrap();
/// let b = puzzle_from_str("1 2 3\n4 5 6\n_ 7 8").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(puzzle_from_str("12345678_").unwrap(), PuzzleState::GOAL);
///
/// assert!(puzzle_from_str("12345678").is_err());
/// assert!(puzzle_from_str("1 2 3 4 5 6 7 8 x").is_err());
/// ```
pub fn puzzle_from_str(s: &str) -> Result<PuzzleState, PuzzleError> {
    let tiles = s
        .chars()
        .filter(|&c| !c.is_whitespace() && c != ',')
        .map(|c| match c {
            '_' => Ok(0),
            _ => c
                .to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| PuzzleError::InvalidToken {
                    token: c.to_string(),
                }),
        })
        .collect::<Result<Vec<u8>, PuzzleError>>()?;

    PuzzleState::from_slice(&tiles)
}

/// Parses one blocks-world predicate.
///
/// Both call syntax (`ON(A,B)`, `ARMEMPTY`, `ARMEMPTY()`) and the
/// space-separated form (`ON A B`) are accepted. Relation names are
/// case-insensitive; block names are kept as written.
///
/// # Examples
/// ```
/// use ai_search::blocks::Predicate;
/// use ai_search::utils::predicate_from_str;
///
/// assert_eq!(predicate_from_str("ON(B, A)").unwrap(), Predicate::on("B", "A"));
/// assert_eq!(predicate_from_str("ontable C").unwrap(), Predicate::on_table("C"));
/// assert_eq!(predicate_from_str("ARMEMPTY").unwrap(), Predicate::ArmEmpty);
/// assert!(predicate_from_str("ON(A)").is_err());
/// assert!(predicate_from_str("FLY(A)").is_err());
/// ```
pub fn predicate_from_str(s: &str) -> Result<Predicate, ParseError> {
    let input = s.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }
    let malformed = || ParseError::Malformed {
        input: input.to_string(),
    };

    let (name, args): (&str, Vec<&str>) = match input.find('(') {
        Some(open) => {
            let inner = input[open + 1..].strip_suffix(')').ok_or_else(malformed)?;
            if inner.contains(['(', ')']) {
                return Err(malformed());
            }
            let args: Vec<&str> = inner.split(',').map(str::trim).collect();
            let args = if args == [""] { Vec::new() } else { args };
            if args.iter().any(|a| a.is_empty() || a.contains(char::is_whitespace)) {
                return Err(malformed());
            }
            (input[..open].trim(), args)
        }
        None => {
            let mut parts = input.split_whitespace();
            let name = parts.next().ok_or(ParseError::Empty)?;
            (name, parts.collect())
        }
    };

    let name = name.to_ascii_uppercase();
    let expected = match name.as_str() {
        "ON" => 2,
        "ONTABLE" | "CLEAR" | "HOLDING" => 1,
        "ARMEMPTY" => 0,
        _ => return Err(ParseError::UnknownRelation { name }),
    };
    if args.len() != expected {
        return Err(ParseError::WrongArity {
            name,
            expected,
            found: args.len(),
        });
    }

    Ok(match name.as_str() {
        "ON" => Predicate::on(args[0], args[1]),
        "ONTABLE" => Predicate::on_table(args[0]),
        "CLEAR" => Predicate::clear(args[0]),
        "HOLDING" => Predicate::holding(args[0]),
        _ => Predicate::ArmEmpty,
    })
}

/// Parses a list of predicates separated by `;` or newlines, skipping blanks.
///
/// # Examples
/// ```
/// use ai_search::blocks::Predicate;
/// use ai_search::utils::predicates_from_str;
///
/// let facts = predicates_from_str("ONTABLE(A); ON(B,A)\nARMEMPTY").unwrap();
/// assert_eq!(
///     facts,
///     vec![Predicate::on_table("A"), Predicate::on("B", "A"), Predicate::ArmEmpty]
/// );
/// ```
pub fn predicates_from_str(s: &str) -> Result<Vec<Predicate>, ParseError> {
    s.split(|c| c == ';' || c == '\n')
        .filter(|part| !part.trim().is_empty())
        .map(predicate_from_str)
        .collect()
}
