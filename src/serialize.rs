// src/serialize.rs

//! On-the-wire (in-memory-only) encoding for a sorted set: `int32 size`
//! followed by length-prefixed (member, canonical score) pairs, in member
//! map iteration order. Mirrors the `write_string`/`read_string` shape of
//! the teacher's snapshot encoder, trimmed to the single length-prefix
//! scheme this format calls for.

use crate::entry::Entry;
use crate::member_map::MemberMap;
use crate::tree::ScoreSet;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io;
use std::sync::Arc;

fn write_string(buf: &mut BytesMut, s: &[u8]) {
    buf.put_u32(s.len() as u32);
    buf.put_slice(s);
}

fn read_string(cursor: &mut Bytes) -> io::Result<Bytes> {
    if cursor.remaining() < 4 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "missing length prefix"));
    }
    let len = cursor.get_u32() as usize;
    if cursor.remaining() < len {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated string"));
    }
    Ok(cursor.split_to(len))
}

/// Serializes `members` (iterated in its own order) into the wire format.
/// Callers are expected to hold the set's lock for the duration, since this
/// reads both indexes and must not race a concurrent mutator.
pub fn serialize(members: &MemberMap) -> Bytes {
    let mut buf = BytesMut::new();
    buf.put_u32(members.len() as u32);
    for (member, entry) in members.iter() {
        write_string(&mut buf, member);
        write_string(&mut buf, &entry.score_bytes);
    }
    buf.freeze()
}

/// Reconstructs a fresh member map and tree from bytes produced by
/// [`serialize`].
pub fn deserialize(mut data: Bytes) -> io::Result<(MemberMap, ScoreSet)> {
    if data.remaining() < 4 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "missing size header"));
    }
    let size = data.get_u32() as usize;
    let mut members = MemberMap::with_capacity(size);
    let mut tree = ScoreSet::new();
    for _ in 0..size {
        let member = read_string(&mut data)?;
        let score_bytes = read_string(&mut data)?;
        let score_text = std::str::from_utf8(&score_bytes)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "score bytes are not UTF-8"))?;
        let score: f64 = score_text
            .parse()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "score bytes are not a float"))?;
        let entry = Arc::new(Entry {
            member: member.clone(),
            score_bytes,
            score,
        });
        members.insert(member, entry.clone());
        tree.insert(entry);
    }
    Ok((members, tree))
}
