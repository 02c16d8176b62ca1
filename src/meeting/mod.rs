// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Jitsi Meet join links

pub mod url;

pub use self::url::{build_join_url, meeting_base_url, JWT_QUERY_PARAM};
