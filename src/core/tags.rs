//! HTML tag identifiers
//!
//! `Tag` is generated from a single table so the name lookup, the
//! canonical spelling and the bit position used by [`TagSet`] never drift
//! apart. Names not in the table map to `Tag::Unknown`; the element keeps
//! its original (lowercased) name in the document's string pool.

macro_rules! html_tags {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Enumerated HTML element tag
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Tag {
            $($variant,)*
            /// Any tag not in the table
            Unknown,
        }

        impl Tag {
            /// Every known tag, in table order (excludes `Unknown`)
            pub const KNOWN: &'static [Tag] = &[$(Tag::$variant,)*];

            /// Look up a tag by its lowercase name
            pub fn from_lowercase(name: &str) -> Tag {
                match name {
                    $($name => Tag::$variant,)*
                    _ => Tag::Unknown,
                }
            }

            /// Canonical lowercase name; empty for `Unknown`
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Tag::$variant => $name,)*
                    Tag::Unknown => "",
                }
            }
        }
    };
}

html_tags! {
    Html => "html", Head => "head", Title => "title", Base => "base",
    Link => "link", Meta => "meta", Style => "style", Script => "script",
    Noscript => "noscript", Template => "template", Body => "body",
    Article => "article", Section => "section", Nav => "nav", Aside => "aside",
    H1 => "h1", H2 => "h2", H3 => "h3", H4 => "h4", H5 => "h5", H6 => "h6",
    Hgroup => "hgroup", Header => "header", Footer => "footer",
    Address => "address", P => "p", Hr => "hr", Pre => "pre",
    Blockquote => "blockquote", Ol => "ol", Ul => "ul", Li => "li",
    Dl => "dl", Dt => "dt", Dd => "dd", Figure => "figure",
    Figcaption => "figcaption", Main => "main", Div => "div", A => "a",
    Em => "em", Strong => "strong", Small => "small", S => "s",
    Cite => "cite", Q => "q", Dfn => "dfn", Abbr => "abbr", Data => "data",
    Time => "time", Code => "code", Var => "var", Samp => "samp",
    Kbd => "kbd", Sub => "sub", Sup => "sup", I => "i", B => "b", U => "u",
    Mark => "mark", Ruby => "ruby", Rt => "rt", Rp => "rp", Rb => "rb",
    Rtc => "rtc", Bdi => "bdi", Bdo => "bdo", Span => "span", Br => "br",
    Wbr => "wbr", Ins => "ins", Del => "del", Image => "image", Img => "img",
    Picture => "picture", Iframe => "iframe", Embed => "embed",
    Object => "object", Param => "param", Video => "video", Audio => "audio",
    Source => "source", Track => "track", Canvas => "canvas", Map => "map",
    Area => "area", Math => "math", Mi => "mi", Mo => "mo", Mn => "mn",
    Ms => "ms", Mtext => "mtext", Mglyph => "mglyph",
    Malignmark => "malignmark", AnnotationXml => "annotation-xml",
    Svg => "svg", ForeignObject => "foreignobject", Desc => "desc",
    Table => "table", Caption => "caption", Colgroup => "colgroup",
    Col => "col", Tbody => "tbody", Thead => "thead", Tfoot => "tfoot",
    Tr => "tr", Td => "td", Th => "th", Form => "form",
    Fieldset => "fieldset", Legend => "legend", Label => "label",
    Input => "input", Button => "button", Select => "select",
    Datalist => "datalist", Optgroup => "optgroup", Option => "option",
    Textarea => "textarea", Keygen => "keygen", Output => "output",
    Progress => "progress", Meter => "meter", Details => "details",
    Summary => "summary", Dialog => "dialog", Menu => "menu",
    Menuitem => "menuitem", Slot => "slot", Applet => "applet",
    Acronym => "acronym", Bgsound => "bgsound", Dir => "dir",
    Frame => "frame", Frameset => "frameset", Noframes => "noframes",
    Isindex => "isindex", Listing => "listing", Xmp => "xmp",
    Nextid => "nextid", Noembed => "noembed", Plaintext => "plaintext",
    Strike => "strike", Basefont => "basefont", Big => "big",
    Blink => "blink", Center => "center", Font => "font",
    Marquee => "marquee", Multicol => "multicol", Nobr => "nobr",
    Spacer => "spacer", Tt => "tt",
}

impl Tag {
    /// Look up a tag by name, ignoring ASCII case
    pub fn from_name(name: &str) -> Tag {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            Tag::from_lowercase(&name.to_ascii_lowercase())
        } else {
            Tag::from_lowercase(name)
        }
    }

    /// Void elements never have children or an end tag
    pub fn is_void(self) -> bool {
        VOID.contains(self)
    }

    /// Content is raw text up to the matching end tag
    pub fn is_raw_text(self) -> bool {
        RAW_TEXT.contains(self)
    }

    /// Raw text whose character references are still decoded
    pub fn is_escapable_raw_text(self) -> bool {
        matches!(self, Tag::Title | Tag::Textarea)
    }

    #[inline]
    const fn bit(self) -> (usize, u64) {
        let n = self as usize;
        (n / 64, 1u64 << (n % 64))
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::Unknown => f.write_str("<unknown>"),
            tag => f.write_str(tag.as_str()),
        }
    }
}

/// A set of tags stored as a bitset, usable in `const` context.
///
/// ```
/// use rustyhtml::{Tag, TagSet};
///
/// const HEADINGS: TagSet = TagSet::of(&[Tag::H1, Tag::H2, Tag::H3]);
/// assert!(HEADINGS.contains(Tag::H2));
/// assert!(!HEADINGS.contains(Tag::P));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TagSet([u64; 3]);

impl TagSet {
    pub const EMPTY: TagSet = TagSet([0; 3]);

    /// Build a set from a slice of tags
    pub const fn of(tags: &[Tag]) -> TagSet {
        let mut set = TagSet::EMPTY;
        let mut i = 0;
        while i < tags.len() {
            set = set.with(tags[i]);
            i += 1;
        }
        set
    }

    /// Copy of this set with `tag` added
    pub const fn with(self, tag: Tag) -> TagSet {
        let (word, mask) = tag.bit();
        let mut bits = self.0;
        bits[word] |= mask;
        TagSet(bits)
    }

    pub const fn union(self, other: TagSet) -> TagSet {
        TagSet([
            self.0[0] | other.0[0],
            self.0[1] | other.0[1],
            self.0[2] | other.0[2],
        ])
    }

    #[inline]
    pub const fn contains(self, tag: Tag) -> bool {
        let (word, mask) = tag.bit();
        self.0[word] & mask != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0
    }

    /// Iterate the members in tag order
    pub fn iter(self) -> impl Iterator<Item = Tag> {
        Tag::KNOWN
            .iter()
            .copied()
            .chain(std::iter::once(Tag::Unknown))
            .filter(move |&t| self.contains(t))
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        iter.into_iter().fold(TagSet::EMPTY, TagSet::with)
    }
}

impl std::ops::BitOr for TagSet {
    type Output = TagSet;

    fn bitor(self, rhs: TagSet) -> TagSet {
        self.union(rhs)
    }
}

pub(crate) const VOID: TagSet = TagSet::of(&[
    Tag::Area,
    Tag::Base,
    Tag::Basefont,
    Tag::Bgsound,
    Tag::Br,
    Tag::Col,
    Tag::Embed,
    Tag::Frame,
    Tag::Hr,
    Tag::Image,
    Tag::Img,
    Tag::Input,
    Tag::Keygen,
    Tag::Link,
    Tag::Meta,
    Tag::Param,
    Tag::Source,
    Tag::Track,
    Tag::Wbr,
]);

pub(crate) const RAW_TEXT: TagSet = TagSet::of(&[
    Tag::Script,
    Tag::Style,
    Tag::Xmp,
    Tag::Iframe,
    Tag::Noembed,
    Tag::Noframes,
    Tag::Title,
    Tag::Textarea,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Tag::from_name("div"), Tag::Div);
        assert_eq!(Tag::from_name("TABLE"), Tag::Table);
        assert_eq!(Tag::from_name("annotation-xml"), Tag::AnnotationXml);
        assert_eq!(Tag::from_name("my-widget"), Tag::Unknown);
    }

    #[test]
    fn test_as_str_round_trips_for_every_known_tag() {
        for &tag in Tag::KNOWN {
            assert_eq!(Tag::from_lowercase(tag.as_str()), tag);
        }
    }

    #[test]
    fn test_tag_count_fits_bitset() {
        assert!((Tag::Unknown as usize) < 192);
    }

    #[test]
    fn test_tag_set() {
        const CELLS: TagSet = TagSet::of(&[Tag::Td, Tag::Th]);
        assert!(CELLS.contains(Tag::Td));
        assert!(CELLS.contains(Tag::Th));
        assert!(!CELLS.contains(Tag::Tr));
        assert!(!CELLS.contains(Tag::Unknown));
        assert_eq!(CELLS.iter().collect::<Vec<_>>(), vec![Tag::Td, Tag::Th]);
        assert!(TagSet::EMPTY.is_empty());
    }

    #[test]
    fn test_void_and_raw_text() {
        assert!(Tag::Br.is_void());
        assert!(!Tag::Div.is_void());
        assert!(Tag::Script.is_raw_text());
        assert!(Tag::Title.is_escapable_raw_text());
        assert!(!Tag::Script.is_escapable_raw_text());
    }
}
