//! Per-platform integer and pointer sizes (spec §6 `platform` setting;
//! SPEC_FULL §3, grounded on `checksizeof.h`'s `CheckSizeof`, which is a
//! checker client of exactly this table).
//!
//! Normalization pipeline step 27 ("platform-type mapping") and any checker
//! computing `sizeof` results both need these numbers, so they live in
//! `cppls_tokens` rather than being duplicated per consumer.

/// A target platform, selecting integer widths and pointer size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Win32,
    Win64,
    Unix32,
    Unix64,
}

/// Byte widths for the built-in integer types and pointers on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSizes {
    pub char_bits: u32,
    pub short_size: u32,
    pub int_size: u32,
    pub long_size: u32,
    pub long_long_size: u32,
    pub pointer_size: u32,
    pub size_t_size: u32,
}

impl Platform {
    pub fn type_sizes(self) -> TypeSizes {
        match self {
            Platform::Win32 => TypeSizes {
                char_bits: 8,
                short_size: 2,
                int_size: 4,
                long_size: 4,
                long_long_size: 8,
                pointer_size: 4,
                size_t_size: 4,
            },
            Platform::Win64 => TypeSizes {
                char_bits: 8,
                short_size: 2,
                int_size: 4,
                long_size: 4,
                long_long_size: 8,
                pointer_size: 8,
                size_t_size: 8,
            },
            Platform::Unix32 => TypeSizes {
                char_bits: 8,
                short_size: 2,
                int_size: 4,
                long_size: 4,
                long_long_size: 8,
                pointer_size: 4,
                size_t_size: 4,
            },
            Platform::Unix64 => TypeSizes {
                char_bits: 8,
                short_size: 2,
                int_size: 4,
                long_size: 8,
                long_long_size: 8,
                pointer_size: 8,
                size_t_size: 8,
            },
        }
    }

    /// The bit width of `int` on this platform, used by the `shiftTooManyBits`
    /// family of checks (spec §8 scenario 2).
    pub fn int_bits(self) -> u32 {
        self.type_sizes().int_size * 8
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Unix64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix32_int_is_32_bits() {
        assert_eq!(Platform::Unix32.int_bits(), 32);
    }

    #[test]
    fn unix64_long_is_8_bytes_but_win64_long_is_4() {
        assert_eq!(Platform::Unix64.type_sizes().long_size, 8);
        assert_eq!(Platform::Win64.type_sizes().long_size, 4);
    }

    #[test]
    fn pointer_size_tracks_bitness() {
        assert_eq!(Platform::Unix32.type_sizes().pointer_size, 4);
        assert_eq!(Platform::Unix64.type_sizes().pointer_size, 8);
    }
}
