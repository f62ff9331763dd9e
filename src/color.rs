use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    // even identities are white
    pub fn for_id(id: usize) -> Self {
        if id % 2 == 0 { Color::White } else { Color::Black }
    }
    pub fn is_white(self) -> bool { self == Color::White }
    pub fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<bool> for Color {
    fn from(is_white: bool) -> Self {
        if is_white { Color::White } else { Color::Black }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Participant {
    pub id: usize,
    pub color: Color,
}

impl Participant {
    pub fn new(id: usize, color: Color) -> Self {
        Participant { id, color }
    }
    pub fn reference(id: usize) -> Self {
        Participant { id, color: Color::for_id(id) }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.color, self.id)
    }
}
