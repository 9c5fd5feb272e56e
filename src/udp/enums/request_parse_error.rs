use std::io;
use either::Either;
use crate::udp::structs::connection_id::ConnectionId;
use crate::udp::structs::transaction_id::TransactionId;

/// Why a datagram failed to parse.
///
/// `Sendable` means enough of the header survived that the client can be
/// answered with an error packet carrying its transaction id; `Unsendable`
/// datagrams are dropped silently.
#[derive(Debug)]
pub enum RequestParseError {
    Sendable {
        connection_id: ConnectionId,
        transaction_id: TransactionId,
        err: Either<io::Error, &'static str>,
    },
    Unsendable {
        err: Either<io::Error, &'static str>,
    },
}

impl RequestParseError {
    pub fn sendable_io(err: io::Error, connection_id: i64, transaction_id: i32) -> Self {
        Self::Sendable {
            connection_id: ConnectionId(connection_id),
            transaction_id: TransactionId(transaction_id),
            err: Either::Left(err),
        }
    }

    pub fn sendable_text(text: &'static str, connection_id: i64, transaction_id: i32) -> Self {
        Self::Sendable {
            connection_id: ConnectionId(connection_id),
            transaction_id: TransactionId(transaction_id),
            err: Either::Right(text),
        }
    }

    pub fn unsendable_io(err: io::Error) -> Self {
        Self::Unsendable { err: Either::Left(err) }
    }

    pub fn unsendable_text(text: &'static str) -> Self {
        Self::Unsendable { err: Either::Right(text) }
    }
}
