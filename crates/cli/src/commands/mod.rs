pub mod info;
pub mod pack;
pub mod roundtrip;
pub mod unpack;
pub mod verify;
