mod observing;
mod properties;
mod samples;
