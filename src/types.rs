// src/types.rs
use std::fmt;

/// Byte order of multi-byte fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::Little => "little-endian",
            ByteOrder::Big => "big-endian",
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric kind of the payload samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    Integer,
    Float,
}

/// The four encoding families a datatype tag can declare.
///
/// The tag characters follow the CSS convention: `i`/`f` for Intel (little-endian)
/// integers and reals, `s`/`t` for SUN (big-endian) integers and reals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFamily {
    IntLittle,
    IntBig,
    FloatLittle,
    FloatBig,
}

impl DataFamily {
    pub fn from_char(c: u8) -> Option<Self> {
        match c {
            b'i' => Some(DataFamily::IntLittle),
            b's' => Some(DataFamily::IntBig),
            b'f' => Some(DataFamily::FloatLittle),
            b't' => Some(DataFamily::FloatBig),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            DataFamily::IntLittle => 'i',
            DataFamily::IntBig => 's',
            DataFamily::FloatLittle => 'f',
            DataFamily::FloatBig => 't',
        }
    }

    pub fn new(kind: NumericKind, order: ByteOrder) -> Self {
        match (kind, order) {
            (NumericKind::Integer, ByteOrder::Little) => DataFamily::IntLittle,
            (NumericKind::Integer, ByteOrder::Big) => DataFamily::IntBig,
            (NumericKind::Float, ByteOrder::Little) => DataFamily::FloatLittle,
            (NumericKind::Float, ByteOrder::Big) => DataFamily::FloatBig,
        }
    }

    pub fn kind(&self) -> NumericKind {
        match self {
            DataFamily::IntLittle | DataFamily::IntBig => NumericKind::Integer,
            DataFamily::FloatLittle | DataFamily::FloatBig => NumericKind::Float,
        }
    }

    pub fn byte_order(&self) -> ByteOrder {
        match self {
            DataFamily::IntLittle | DataFamily::FloatLittle => ByteOrder::Little,
            DataFamily::IntBig | DataFamily::FloatBig => ByteOrder::Big,
        }
    }

    /// Whether `width` is a legal sample width for this family
    pub fn accepts_width(&self, width: usize) -> bool {
        match self.kind() {
            NumericKind::Integer => width == 2 || width == 4,
            NumericKind::Float => width == 4 || width == 8,
        }
    }
}

impl fmt::Display for DataFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A parsed two-character datatype tag such as `s4` or `f8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Datatype {
    family: DataFamily,
    width: usize,
}

impl Datatype {
    pub const I2: Datatype = Datatype { family: DataFamily::IntLittle, width: 2 };
    pub const I4: Datatype = Datatype { family: DataFamily::IntLittle, width: 4 };
    pub const S2: Datatype = Datatype { family: DataFamily::IntBig, width: 2 };
    pub const S4: Datatype = Datatype { family: DataFamily::IntBig, width: 4 };
    pub const F4: Datatype = Datatype { family: DataFamily::FloatLittle, width: 4 };
    pub const F8: Datatype = Datatype { family: DataFamily::FloatLittle, width: 8 };
    pub const T4: Datatype = Datatype { family: DataFamily::FloatBig, width: 4 };
    pub const T8: Datatype = Datatype { family: DataFamily::FloatBig, width: 8 };

    pub fn new(family: DataFamily, width: usize) -> Option<Self> {
        if family.accepts_width(width) {
            Some(Datatype { family, width })
        } else {
            None
        }
    }

    /// Parse the first two characters of a datatype field
    pub fn from_tag(tag: [u8; 2]) -> Option<Self> {
        let family = DataFamily::from_char(tag[0])?;
        let width = match tag[1] {
            b'2' => 2,
            b'4' => 4,
            b'8' => 8,
            _ => return None,
        };
        Self::new(family, width)
    }

    pub fn tag(&self) -> [u8; 2] {
        [self.family.as_char() as u8, b'0' + self.width as u8]
    }

    pub fn family(&self) -> DataFamily {
        self.family
    }

    pub fn sample_width(&self) -> usize {
        self.width
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.family.byte_order()
    }

    pub fn is_integer(&self) -> bool {
        self.family.kind() == NumericKind::Integer
    }

    pub fn is_float(&self) -> bool {
        self.family.kind() == NumericKind::Float
    }

    /// The same kind and width expressed in `order`
    pub fn with_byte_order(&self, order: ByteOrder) -> Self {
        Datatype {
            family: DataFamily::new(self.family.kind(), order),
            width: self.width,
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.family.as_char(), self.width)
    }
}
