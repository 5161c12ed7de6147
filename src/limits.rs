// Hard caps. Tunables that operators are expected to change live in `config`.

/// Maximum hotels held by one directory.
pub const MAX_HOTELS: usize = 10_000;

/// Maximum rooms per hotel.
pub const MAX_ROOMS_PER_HOTEL: usize = 5_000;

/// Maximum length of a hotel name, in bytes.
pub const MAX_NAME_LEN: usize = 256;

/// Maximum length of a room type tag, in bytes.
pub const MAX_ROOM_TYPE_LEN: usize = 64;

/// Maximum length of a hotel address, in bytes.
pub const MAX_ADDRESS_LEN: usize = 1_024;

/// Lowest star rating a hotel may carry.
pub const MIN_STAR_RATING: u8 = 1;

/// Highest star rating a hotel may carry.
pub const MAX_STAR_RATING: u8 = 5;
