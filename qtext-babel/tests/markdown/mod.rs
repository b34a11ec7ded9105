mod export;
mod roundtrip;
