mod decoder;
mod encoder;
mod envelope;
mod fixup;
