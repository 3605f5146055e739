//! Incremental JSON array emission.
//!
//! [`JsonArrayStream`] yields one chunk per element, so a large listing is
//! never held as a single encoded buffer. Once a chunk has been sent it
//! cannot be taken back: a failure part-way through ends the stream and
//! leaves the client with a truncated array.

use bytes::Bytes;
use serde::Serialize;

use crate::json::write_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Nothing emitted yet.
    Start,
    /// `[` and at least one element emitted.
    Elements,
    Finished,
}

/// Lazily encodes `items` as `[e1,e2,...]`.
#[derive(Debug)]
pub struct JsonArrayStream<I> {
    items: I,
    position: Position,
}

impl<I> JsonArrayStream<I>
where
    I: Iterator,
    I::Item: Serialize,
{
    pub fn new(items: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            items: items.into_iter(),
            position: Position::Start,
        }
    }

    /// Encodes the opening bracket and the first element.
    ///
    /// Call this before committing a response status: an error here means
    /// nothing has been written yet and the request can still fail cleanly.
    pub fn open(mut self) -> serde_json::Result<(Bytes, Self)> {
        match self.next() {
            Some(Ok(head)) => Ok((head, self)),
            Some(Err(err)) => Err(err),
            None => Ok((Bytes::new(), self)),
        }
    }
}

impl<I> Iterator for JsonArrayStream<I>
where
    I: Iterator,
    I::Item: Serialize,
{
    type Item = serde_json::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position == Position::Finished {
            return None;
        }

        let Some(item) = self.items.next() else {
            let tail: &'static [u8] = match self.position {
                Position::Start => b"[]",
                _ => b"]",
            };
            self.position = Position::Finished;
            return Some(Ok(Bytes::from_static(tail)));
        };

        let mut chunk = Vec::with_capacity(256);
        chunk.push(match self.position {
            Position::Start => b'[',
            _ => b',',
        });
        self.position = Position::Elements;

        match write_json(&mut chunk, &item) {
            Ok(()) => Some(Ok(Bytes::from(chunk))),
            Err(err) => {
                self.position = Position::Finished;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<I>(stream: JsonArrayStream<I>) -> Vec<serde_json::Result<Bytes>>
    where
        I: Iterator,
        I::Item: Serialize,
    {
        stream.collect()
    }

    fn concat(chunks: &[serde_json::Result<Bytes>]) -> String {
        chunks
            .iter()
            .map(|c| String::from_utf8(c.as_ref().unwrap().to_vec()).unwrap())
            .collect()
    }

    #[test]
    fn empty_input_is_empty_array() {
        let chunks = collect(JsonArrayStream::new(Vec::<u32>::new()));
        assert_eq!(chunks.len(), 1);
        assert_eq!(concat(&chunks), "[]");
    }

    #[test]
    fn one_chunk_per_element_plus_close() {
        let chunks = collect(JsonArrayStream::new(vec![1, 2, 3]));
        assert_eq!(chunks.len(), 4);
        assert_eq!(concat(&chunks), "[1,2,3]");
    }

    #[test]
    fn open_returns_bracket_with_first_element() {
        let (head, rest) = JsonArrayStream::new(vec!["a", "b"]).open().unwrap();
        assert_eq!(&head[..], b"[\"a\"");
        let tail: Vec<_> = rest.map(Result::unwrap).collect();
        assert_eq!(tail, vec![Bytes::from_static(b",\"b\""), Bytes::from_static(b"]")]);
    }

    #[test]
    fn open_on_empty_input_yields_whole_array() {
        let (head, mut rest) = JsonArrayStream::new(Vec::<u8>::new()).open().unwrap();
        assert_eq!(&head[..], b"[]");
        assert!(rest.next().is_none());
    }

    struct Failing;

    impl Serialize for Failing {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refused"))
        }
    }

    #[derive(Serialize)]
    #[serde(untagged)]
    enum Item {
        Good(u8),
        Bad(Failing),
    }

    #[test]
    fn failure_on_first_element_surfaces_from_open() {
        let result = JsonArrayStream::new(vec![Item::Bad(Failing), Item::Good(1)]).open();
        assert!(result.is_err());
    }

    #[test]
    fn failure_mid_stream_ends_the_stream() {
        let chunks = collect(JsonArrayStream::new(vec![
            Item::Good(1),
            Item::Bad(Failing),
            Item::Good(3),
        ]));
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].is_ok());
        assert!(chunks[1].is_err());
    }
}
