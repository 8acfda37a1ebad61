//! Resolving a canonical timezone to the user's current calendar day.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The UTC offset currently in effect for a canonical timezone name such as
/// `"Pacific/Auckland"`, or `None` if the name is unknown.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in the given canonical timezone.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the name is not a canonical
/// timezone string.
pub fn local_date(canonical_timezone: &str) -> Result<Date, Error> {
    let offset = get_local_offset(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))?;

    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::local_date;

    #[test]
    fn resolves_canonical_timezones() {
        assert!(local_date("Pacific/Auckland").is_ok());
        assert!(local_date("America/New_York").is_ok());
    }

    #[test]
    fn rejects_unknown_timezones() {
        assert_eq!(
            local_date("Middle/Nowhere"),
            Err(Error::InvalidTimezone("Middle/Nowhere".to_owned()))
        );
    }
}
