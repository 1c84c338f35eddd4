//! Per-token boolean metadata, packed into a bitset.
//!
//! Spec §3 lists roughly thirty boolean attributes on `Token`. Storing each
//! as a `bool` field would bloat every token by thirty bytes; packed into a
//! single `u64` the flags cost eight bytes total, matching the "packed bits"
//! guidance in spec §9. A hot, frequently-compared field like `variable_id`
//! stays a separate field on [`crate::Token`] rather than living in here.

/// A set of boolean token attributes, packed one-bit-per-flag into a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TokenFlags(u64);

macro_rules! flags {
    ($( $(#[$meta:meta])* $name:ident = $bit:expr ;)*) => {
        impl TokenFlags {
            $(
                $(#[$meta])*
                pub const $name: TokenFlags = TokenFlags(1u64 << $bit);
            )*
        }
    };
}

flags! {
    IS_LONG = 0;
    IS_UNSIGNED = 1;
    IS_SIGNED = 2;
    IS_POINTER_COMPARE = 3;
    IS_CAST = 4;
    IS_TEMPLATE_ARG = 5;
    IS_ATTRIBUTE_CONSTRUCTOR = 6;
    IS_ATTRIBUTE_DESTRUCTOR = 7;
    IS_ATTRIBUTE_PURE = 8;
    IS_ATTRIBUTE_CONST = 9;
    IS_ATTRIBUTE_NORETURN = 10;
    IS_ATTRIBUTE_NOTHROW = 11;
    IS_ATTRIBUTE_NODISCARD = 12;
    IS_ATTRIBUTE_UNUSED = 13;
    IS_ATTRIBUTE_USED = 14;
    IS_ATTRIBUTE_PACKED = 15;
    IS_ATTRIBUTE_MAYBE_UNUSED = 16;
    IS_ATTRIBUTE_FALLTHROUGH = 17;
    IS_ATTRIBUTE_EXPORT = 18;
    IS_ATTRIBUTE_ALIGNED = 19;
    IS_SIMPLIFIED_TYPEDEF = 20;
    IS_SPLIT_VAR_DECL_EQ = 21;
    IS_SPLIT_VAR_DECL_COMMA = 22;
    IS_EXTERN_C = 23;
    IS_INLINE = 24;
    IS_RESTRICT = 25;
    IS_ATOMIC = 26;
    IS_COMPLEX = 27;
    IS_ANONYMOUS = 28;
    IS_REMOVED_VOID_PARAMETER = 29;
    IS_INIT_BRACKET = 30;
    IS_SIMPLIFIED_SCOPE = 31;
    IS_CONSTEXPR = 32;
    IS_CPP_CAST = 34;
}

impl TokenFlags {
    pub const NONE: TokenFlags = TokenFlags(0);

    pub fn contains(self, flag: TokenFlags) -> bool {
        self.0 & flag.0 == flag.0
    }

    pub fn set(&mut self, flag: TokenFlags) {
        self.0 |= flag.0;
    }

    pub fn unset(&mut self, flag: TokenFlags) {
        self.0 &= !flag.0;
    }

    pub fn with(mut self, flag: TokenFlags) -> Self {
        self.set(flag);
        self
    }
}

impl std::ops::BitOr for TokenFlags {
    type Output = TokenFlags;
    fn bitor(self, rhs: TokenFlags) -> TokenFlags {
        TokenFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for TokenFlags {
    fn bitor_assign(&mut self, rhs: TokenFlags) {
        self.0 |= rhs.0;
    }
}
