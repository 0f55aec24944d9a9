use bson::{to_document, DateTime, Document};
use mongodb::options::UpdateOptions;
use std::ops::Deref;

use crate::{
    models::{OtpRecord, SessionCredential},
    Error, Result, Success,
};

use super::{definition::AbstractDatabase, Migration};

#[derive(Clone)]
pub struct MongoDb(pub mongodb::Database);

impl Deref for MongoDb {
    type Target = mongodb::Database;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn now_rfc3339() -> String {
    DateTime::now()
        .try_to_rfc3339_string()
        .expect("failed to convert to rfc3339 time string")
}

#[async_trait]
impl AbstractDatabase for MongoDb {
    /// Run a database migration
    async fn run_migration(&self, migration: Migration) -> Success {
        match migration {
            #[cfg(debug_assertions)]
            Migration::WipeAll => {
                // Drop the entire database
                self.drop().await.unwrap();
            }
            Migration::M2026_01_12EnsureIndexes => {
                if self
                    .collection::<Document>("otps")
                    .list_index_names()
                    .await
                    .unwrap_or_default()
                    .contains(&"event_claimant".to_owned())
                {
                    return Ok(());
                }

                // Make sure all collections exist
                let list = self.list_collection_names().await.unwrap();

                for name in ["otps", "sessions"] {
                    if !list.contains(&name.to_string()) {
                        self.create_collection(name).await.unwrap();
                    }
                }

                // Setup index for `otps`
                self.run_command(doc! {
                    "createIndexes": "otps",
                    "indexes": [
                        {
                            "key": {
                                "event_id": 1,
                                "claimant_email_normalised": 1
                            },
                            "name": "event_claimant",
                            "unique": true
                        },
                        {
                            "key": {
                                "expires_at": 1
                            },
                            "name": "expires_at"
                        }
                    ]
                })
                .await
                .unwrap();

                // Setup index for `sessions`
                self.run_command(doc! {
                    "createIndexes": "sessions",
                    "indexes": [
                        {
                            "key": {
                                "token": 1
                            },
                            "name": "token",
                            "unique": true
                        },
                        {
                            "key": {
                                "event_id": 1
                            },
                            "name": "event_id"
                        },
                        {
                            "key": {
                                "expires_at": 1
                            },
                            "name": "expires_at"
                        }
                    ]
                })
                .await
                .unwrap();
            }
        }

        Ok(())
    }

    /// Find the outstanding code for an event/claimant pair
    async fn find_otp(
        &self,
        event_id: &str,
        email_normalised: &str,
    ) -> Result<Option<OtpRecord>> {
        self.collection("otps")
            .find_one(doc! {
                "event_id": event_id,
                "claimant_email_normalised": email_normalised
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "otp",
            })
    }

    /// Save a code, replacing any previous one for the same pair
    async fn save_otp(&self, otp: &OtpRecord) -> Success {
        // Supersede-then-insert; the unique index on the pair keeps it
        // singular and `consume_otp` matches on _id, so a verify racing
        // the swap loses with NoPendingRequest.
        self.collection::<OtpRecord>("otps")
            .delete_many(doc! {
                "event_id": &otp.event_id,
                "claimant_email_normalised": &otp.claimant_email_normalised
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "delete_many",
                with: "otp",
            })?;

        self.collection::<OtpRecord>("otps")
            .insert_one(otp)
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "insert_one",
                with: "otp",
            })
            .map(|_| ())
    }

    /// Atomically flip a code from unused to consumed
    async fn consume_otp(&self, otp: &OtpRecord) -> Success {
        let updated = self
            .collection::<OtpRecord>("otps")
            .find_one_and_update(
                doc! {
                    "_id": &otp.id,
                    "consumed": false
                },
                doc! {
                    "$set": {
                        "consumed": true
                    }
                },
            )
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one_and_update",
                with: "otp",
            })?;

        if updated.is_some() {
            return Ok(());
        }

        // Distinguish a consumed record from a superseded or purged one
        self.collection::<OtpRecord>("otps")
            .find_one(doc! {
                "_id": &otp.id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "otp",
            })?
            .map_or(Err(Error::NoPendingRequest), |_| Err(Error::AlreadyUsed))
    }

    /// Remove codes whose expiry has passed
    async fn purge_expired_otps(&self) -> Success {
        self.collection::<OtpRecord>("otps")
            .delete_many(doc! {
                "expires_at": {
                    "$lt": now_rfc3339()
                }
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "delete_many",
                with: "otp",
            })
            .map(|_| ())
    }

    /// Find session by token
    async fn find_session_by_token(&self, token: &str) -> Result<Option<SessionCredential>> {
        self.collection("sessions")
            .find_one(doc! {
                "token": token
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "session",
            })
    }

    /// Save session
    async fn save_session(&self, session: &SessionCredential) -> Success {
        self.collection::<SessionCredential>("sessions")
            .update_one(
                doc! {
                    "_id": &session.id
                },
                doc! {
                    "$set": to_document(session).map_err(|_| Error::DatabaseError {
                        operation: "to_document",
                        with: "session",
                    })?
                },
            )
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "upsert_one",
                with: "session",
            })
            .map(|_| ())
    }

    /// Delete session
    async fn delete_session(&self, id: &str) -> Success {
        self.collection::<SessionCredential>("sessions")
            .delete_one(doc! {
                "_id": id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "delete_one",
                with: "session",
            })
            .map(|_| ())
    }

    /// Remove sessions whose expiry has passed
    async fn purge_expired_sessions(&self) -> Success {
        self.collection::<SessionCredential>("sessions")
            .delete_many(doc! {
                "expires_at": {
                    "$lt": now_rfc3339()
                }
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "delete_many",
                with: "session",
            })
            .map(|_| ())
    }

    /// Drop every code and session scoped to an event
    async fn delete_event_credentials(&self, event_id: &str) -> Success {
        self.collection::<OtpRecord>("otps")
            .delete_many(doc! {
                "event_id": event_id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "delete_many",
                with: "otp",
            })?;

        self.collection::<SessionCredential>("sessions")
            .delete_many(doc! {
                "event_id": event_id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "delete_many",
                with: "session",
            })
            .map(|_| ())
    }
}
