// Transaction line parsing
use crate::error::ParseError;

/// Integer key of one transacting party
pub type PartyId = i64;

/// Number of comma-separated fields every transaction line must carry
pub const FIELD_COUNT: usize = 5;

const FROM_FIELD: usize = 1;
const TO_FIELD: usize = 2;

/// One parsed transaction line.
///
/// Only the two party ids are interpreted. The other fields are kept as
/// borrowed text; `message` holds everything after the fourth comma, so free
/// text containing commas stays intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction<'a> {
    pub timestamp: &'a str,
    pub from: PartyId,
    pub to: PartyId,
    pub amount: &'a str,
    pub message: &'a str,
}

impl<'a> Transaction<'a> {
    /// Parse a raw line of the form `time, id1, id2, amount, message`
    pub fn parse(line: &'a str) -> Result<Self, ParseError> {
        let mut fields: [&str; FIELD_COUNT] = [""; FIELD_COUNT];
        let mut found = 0;
        for field in line.splitn(FIELD_COUNT, ',') {
            fields[found] = field;
            found += 1;
        }
        if found < FIELD_COUNT {
            return Err(ParseError::MissingFields {
                expected: FIELD_COUNT,
                found,
            });
        }

        Ok(Self {
            timestamp: fields[0],
            from: parse_party(fields[FROM_FIELD], FROM_FIELD)?,
            to: parse_party(fields[TO_FIELD], TO_FIELD)?,
            amount: fields[3],
            message: fields[4],
        })
    }

    #[inline]
    #[must_use]
    pub fn parties(&self) -> (PartyId, PartyId) {
        (self.from, self.to)
    }

    #[inline]
    #[must_use]
    pub fn is_self_transaction(&self) -> bool {
        self.from == self.to
    }
}

/// Pair each line with its 1-based physical line number, dropping the header
/// line when `skip_header` is set. The header still counts as line 1.
pub fn numbered<I>(lines: I, skip_header: bool) -> impl Iterator<Item = (usize, I::Item)>
where
    I: IntoIterator,
{
    lines
        .into_iter()
        .enumerate()
        .skip(usize::from(skip_header))
        .map(|(index, line)| (index + 1, line))
}

fn parse_party(raw: &str, field: usize) -> Result<PartyId, ParseError> {
    raw.trim()
        .parse::<PartyId>()
        .map_err(|_| ParseError::InvalidPartyId {
            field,
            value: raw.to_string(),
        })
}
