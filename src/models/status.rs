// src/models/status.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

// Gera um enum fechado com a forma "wire" em minúsculas.
// O mesmo nome de tipo é usado no CREATE TYPE do Postgres (ver migrations/).
// `FromStr` é a única validação de status usada por todos os caminhos de update.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $pg_type:tt, $label:tt {
            $($variant:ident => $wire:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
        #[sqlx(type_name = $pg_type, rename_all = "lowercase")]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok($name::$variant),)+
                    other => Err(AppError::InvalidStatus {
                        entity: $label,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

closed_enum! {
    /// Papel do usuário, fixo na criação.
    UserRole, "user_role", "user role" {
        Admin => "admin",
        Parent => "parent",
        Tutor => "tutor",
    }
}

closed_enum! {
    /// Etapa de uma solicitação de pais. Só muda via update explícito.
    InquiryStatus, "inquiry_status", "inquiry" {
        New => "new",
        Scheduled => "scheduled",
        Matched => "matched",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

closed_enum! {
    CallStatus, "call_status", "call" {
        Scheduled => "scheduled",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

closed_enum! {
    CallType, "call_type", "call type" {
        Phone => "phone",
        Video => "video",
    }
}

closed_enum! {
    SessionStatus, "session_status", "session" {
        Scheduled => "scheduled",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

closed_enum! {
    InvoiceStatus, "invoice_status", "invoice" {
        Draft => "draft",
        Sent => "sent",
        Paid => "paid",
        Overdue => "overdue",
    }
}

impl Default for InquiryStatus {
    fn default() -> Self {
        InquiryStatus::New
    }
}

impl Default for CallStatus {
    fn default() -> Self {
        CallStatus::Scheduled
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Scheduled
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}
