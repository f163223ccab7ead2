use anyhow::Result;
use std::io::Read;

/// The type of callback functions to call when warnings are raised while parsing an input file.
///
/// The first parameter is the (1-based) line number, the second one is the warning message.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait implemented by objects able to read networks or observation profiles.
pub trait InstanceReader<T> {
    /// Reads an instance.
    ///
    /// Malformed lines do not stop the reading: they are skipped,
    /// and the callback functions registered by [add_warning_handler](Self::add_warning_handler) are triggered.
    /// Errors are only returned when the underlying reader fails.
    ///
    /// # Example
    ///
    /// ```
    /// # use iggy::graph::Network;
    /// # use iggy::io::{InstanceReader, NetworkReader};
    /// fn read_network_from_str(s: &str) -> Network {
    ///     let reader = NetworkReader::default();
    ///     reader.read(&mut s.as_bytes()).expect("cannot read the network")
    /// }
    /// # read_network_from_str("A 1 B");
    /// ```
    fn read(&self, reader: &mut dyn Read) -> Result<T>;

    /// Adds a callback function to call when warnings are raised while parsing an instance.
    fn add_warning_handler(&mut self, h: WarningHandler);
}
