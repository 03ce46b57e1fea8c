use crate::areas::database::ObjectReader;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;

pub const DEFAULT_ABBREVIATION_LENGTH: usize = 7;
pub const MIN_ABBREVIATION_LENGTH: usize = 4;

/// Shortest prefix of `id`, at least `length` characters, naming no other object
///
/// The zero id is never looked up. When the object space cannot be queried
/// the full id is returned.
pub fn abbreviate(id: &ObjectId, length: usize, reader: &dyn ObjectReader) -> String {
    let length = length.clamp(MIN_ABBREVIATION_LENGTH, OBJECT_ID_LENGTH);
    if id.is_zero() {
        return id.prefix(length).to_string();
    }

    let matches = match reader.resolve_prefix(id.prefix(length)) {
        Ok(matches) => matches,
        Err(err) => {
            tracing::debug!(%id, "cannot resolve abbreviation: {err:#}");
            return id.to_string();
        }
    };

    // one more character than the longest prefix shared with another object
    let unique_length = matches
        .iter()
        .filter(|other| *other != id)
        .map(|other| common_prefix_length(id.as_ref(), other.as_ref()) + 1)
        .max()
        .unwrap_or(length);

    id.prefix(unique_length.max(length)).to_string()
}

fn common_prefix_length(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}
