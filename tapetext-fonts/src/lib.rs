//! TrueType fonts bundled with the [`tapetext`](https://crates.io/crates/tapetext) crate.
//!
//! The fonts are from the DejaVu family (Bitstream Vera license, see `fonts/LICENSE`).
//! [`FontFile::DEFAULT`] is the sans-serif face `tapetext` renders with unless told otherwise.

macro_rules! fonts {
    ($($name:ident => $file_name:expr,)*) => {

        /// Included fonts
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[non_exhaustive]
        pub enum FontFile {
            $(
                #[doc = concat!("Font `", $file_name, ".ttf`")]
                $name,
            )*
        }

        impl FontFile {
            /// An array containing all the variants
            pub const ALL: [Self; const{0 $(+ {_ = $file_name; 1} )*}] = [$(Self::$name),*];

            /// The contents of a font file
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $(Self::$name => include_bytes!(concat!("../fonts/", $file_name, ".ttf")),)*
                }
            }

            /// The file stem
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$name => $file_name,)*
                }
            }

            /// Match a font name to an included font
            ///
            /// Matching ignores ASCII case, so `dejavusans` finds [`FontFile::Sans`].
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL
                    .into_iter()
                    .find(|font| font.name().eq_ignore_ascii_case(name))
            }

        }

    };
}

fonts! {
    Sans => "DejaVuSans",
    SansBold => "DejaVuSans-Bold",
    SansCondensed => "DejaVuSansCondensed",
}

impl FontFile {
    /// The font used when no other is configured.
    pub const DEFAULT: Self = Self::Sans;
}

#[cfg(test)]
mod tests {
    use super::FontFile;

    #[test]
    fn names_round_trip() {
        for font in FontFile::ALL {
            assert_eq!(FontFile::from_name(font.name()), Some(font));
        }
        assert_eq!(FontFile::from_name("dejavusans"), Some(FontFile::Sans));
        assert_eq!(FontFile::from_name("Comic Sans"), None);
    }

    #[test]
    fn files_look_like_truetype() {
        for font in FontFile::ALL {
            let bytes = font.as_bytes();
            assert_eq!(&bytes[..4], b"\x00\x01\x00\x00", "{} is not a TrueType file", font.name());
        }
    }
}
