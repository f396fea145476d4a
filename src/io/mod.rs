mod byte_reader;

pub use byte_reader::{ByteOrder, ByteReader, BYTE_ORDER_BIG_ENDIAN, BYTE_ORDER_LITTLE_ENDIAN};
