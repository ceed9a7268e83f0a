//! Unit tests for the practice session engine

#[cfg(test)]
mod support {
    use crate::domain::entities::PracticeSession;
    use crate::domain::value_objects::AnswerKey;
    use crate::infra::memory::{InMemoryPracticeRepository, StaticExamCatalog};
    use kernel::id::SessionId;

    pub const EXAM: &str = "rust-fundamentals";

    pub fn question_ids(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("q{i}")).collect()
    }

    pub fn sample_session(n: usize) -> PracticeSession {
        PracticeSession::new(SessionId::new(), EXAM, "student-1", question_ids(n))
    }

    /// Key: every question accepts choice 1, and q2 additionally choice 2
    pub fn sample_key(n: usize) -> AnswerKey {
        question_ids(n)
            .into_iter()
            .map(|qid| {
                let accepted = if qid == "q2" { vec![1, 2] } else { vec![1] };
                (qid, accepted)
            })
            .collect()
    }

    pub async fn seeded_repo(
        session: &PracticeSession,
    ) -> (InMemoryPracticeRepository, StaticExamCatalog) {
        let repo = InMemoryPracticeRepository::new();
        repo.insert(session.clone()).await;
        let catalog = StaticExamCatalog::single(EXAM, sample_key(session.total_questions()));
        (repo, catalog)
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::domain::value_objects::SessionOperation;
    use crate::error::PracticeError;
    use crate::presentation::dto::SessionOperationRequest;

    #[test]
    fn test_advance_deserialization() {
        let json = r#"{"operation":"advance","currentQuestionIndex":2}"#;
        let request: SessionOperationRequest = serde_json::from_str(json).unwrap();
        let operation = request.into_operation().unwrap();

        assert_eq!(
            operation,
            SessionOperation::Advance {
                current_question_index: 2
            }
        );
    }

    #[test]
    fn test_toggle_flag_deserialization() {
        let json = r#"{"operation":"toggle-flag","questionId":"q3","flagged":true}"#;
        let request: SessionOperationRequest = serde_json::from_str(json).unwrap();
        let operation = request.into_operation().unwrap();

        assert_eq!(
            operation,
            SessionOperation::ToggleFlag {
                question_id: "q3".to_string(),
                flagged: true
            }
        );
    }

    #[test]
    fn test_toggle_bookmark_deserialization() {
        let json = r#"{"operation":"toggle-bookmark","questionId":"q1","bookmarked":false}"#;
        let request: SessionOperationRequest = serde_json::from_str(json).unwrap();
        let operation = request.into_operation().unwrap();

        assert_eq!(
            operation,
            SessionOperation::ToggleBookmark {
                question_id: "q1".to_string(),
                bookmarked: false
            }
        );
    }

    #[test]
    fn test_update_timer_deserialization() {
        let json = r#"{"operation":"update-timer","remainingSeconds":1800}"#;
        let request: SessionOperationRequest = serde_json::from_str(json).unwrap();
        let operation = request.into_operation().unwrap();

        assert_eq!(
            operation,
            SessionOperation::UpdateTimer {
                remaining_seconds: 1800
            }
        );
    }

    #[test]
    fn test_record_answer_deserialization() {
        let json = r#"{"operation":"record-answer","questionId":"q2","selectedAnswers":[1,2],"timeSpentSeconds":45}"#;
        let request: SessionOperationRequest = serde_json::from_str(json).unwrap();
        let operation = request.into_operation().unwrap();

        assert_eq!(
            operation,
            SessionOperation::RecordAnswer {
                question_id: "q2".to_string(),
                selected_answers: vec![1, 2],
                time_spent_seconds: Some(45)
            }
        );
    }

    #[test]
    fn test_record_answer_time_spent_is_optional() {
        let json = r#"{"operation":"record-answer","questionId":"q2","selectedAnswers":[0]}"#;
        let request: SessionOperationRequest = serde_json::from_str(json).unwrap();

        match request.into_operation().unwrap() {
            SessionOperation::RecordAnswer {
                time_spent_seconds, ..
            } => assert_eq!(time_spent_seconds, None),
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_unknown_operation_tag_rejected() {
        let json = r#"{"operation":"self-destruct","questionId":"q1"}"#;
        assert!(serde_json::from_str::<SessionOperationRequest>(json).is_err());
    }

    #[test]
    fn test_missing_discriminant_rejected() {
        let json = r#"{"questionId":"q1","flagged":true}"#;
        assert!(serde_json::from_str::<SessionOperationRequest>(json).is_err());
    }

    #[test]
    fn test_wrong_field_type_rejected() {
        let json = r#"{"operation":"advance","currentQuestionIndex":"two"}"#;
        assert!(serde_json::from_str::<SessionOperationRequest>(json).is_err());
    }

    #[test]
    fn test_negative_index_clamped_to_zero() {
        let request = SessionOperationRequest::Advance {
            current_question_index: -3.0,
        };

        assert_eq!(
            request.into_operation().unwrap(),
            SessionOperation::Advance {
                current_question_index: 0
            }
        );
    }

    #[test]
    fn test_fractional_values_truncated() {
        let request = SessionOperationRequest::UpdateTimer {
            remaining_seconds: 42.9,
        };

        assert_eq!(
            request.into_operation().unwrap(),
            SessionOperation::UpdateTimer {
                remaining_seconds: 42
            }
        );
    }

    #[test]
    fn test_negative_timer_clamped_to_zero() {
        let request = SessionOperationRequest::UpdateTimer {
            remaining_seconds: -5.0,
        };

        assert_eq!(
            request.into_operation().unwrap(),
            SessionOperation::UpdateTimer {
                remaining_seconds: 0
            }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let request = SessionOperationRequest::UpdateTimer {
            remaining_seconds: f64::NAN,
        };
        assert!(matches!(
            request.into_operation(),
            Err(PracticeError::InvalidPayload(_))
        ));

        let request = SessionOperationRequest::Advance {
            current_question_index: f64::INFINITY,
        };
        assert!(matches!(
            request.into_operation(),
            Err(PracticeError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_selected_answers_deduplicated_in_order() {
        let request = SessionOperationRequest::RecordAnswer {
            question_id: "q1".to_string(),
            selected_answers: vec![0.0, 0.0, 2.0],
            time_spent_seconds: None,
        };

        match request.into_operation().unwrap() {
            SessionOperation::RecordAnswer {
                selected_answers, ..
            } => assert_eq!(selected_answers, vec![0, 2]),
            other => panic!("unexpected operation {other:?}"),
        }
    }
}

#[cfg(test)]
mod view_tests {
    use super::support::*;
    use crate::domain::services::CorrectnessRule;
    use crate::presentation::dto::SessionViewResponse;

    #[test]
    fn test_view_serialization_is_camel_case() {
        let mut session = sample_session(3);
        session.record_answer("q1", vec![1], Some(30));
        session.set_flag("q2", true);

        let view =
            SessionViewResponse::build(&session, &sample_key(3), CorrectnessRule::AnyOverlap);
        let json = serde_json::to_value(&view).unwrap();

        assert!(json.get("sessionId").is_some());
        assert!(json.get("examSlug").is_some());
        assert!(json.get("currentQuestionIndex").is_some());
        assert!(json.get("flaggedQuestionIds").is_some());
        assert_eq!(json["status"], "in_progress");

        let first_question = &json["questions"][0];
        assert_eq!(first_question["questionId"], "q1");
        assert_eq!(first_question["isSubmitted"], true);
        assert_eq!(first_question["isCorrect"], true);
        assert_eq!(first_question["timeSpentSeconds"], 30);

        // Unanswered questions serialize an explicit null correctness
        assert!(json["questions"][1]["isCorrect"].is_null());

        let stats = &json["statistics"];
        assert_eq!(stats["answered"], 1);
        assert_eq!(stats["unanswered"], 2);
        assert_eq!(stats["flagged"], 1);
        assert_eq!(stats["totalTimeSpentSeconds"], 30);
    }
}

#[cfg(test)]
mod domain_tests {
    use super::support::*;
    use crate::domain::entities::QuestionProgress;
    use crate::domain::value_objects::SessionStatus;

    #[test]
    fn test_new_session_starts_empty() {
        let session = sample_session(5);

        assert_eq!(session.status, SessionStatus::InProgress);
        assert_eq!(session.current_question_index, 0);
        assert_eq!(session.remaining_seconds, 0);
        assert_eq!(session.total_questions(), 5);
        assert!(session.questions.iter().all(|q| !q.is_submitted));
        assert!(session.flagged_question_ids.is_empty());
    }

    #[test]
    fn test_record_answer_overwrites() {
        let mut progress = QuestionProgress::empty("q1");

        progress.record(vec![0, 2], Some(10));
        assert!(progress.is_submitted);
        assert_eq!(progress.selected_answers, vec![0, 2]);
        assert_eq!(progress.time_spent_seconds, Some(10));

        progress.record(vec![3], None);
        assert!(progress.is_submitted, "resubmission keeps submitted state");
        assert_eq!(progress.selected_answers, vec![3]);
        assert_eq!(progress.time_spent_seconds, None);
    }

    #[test]
    fn test_record_answer_unknown_question() {
        let mut session = sample_session(2);
        assert!(!session.record_answer("q9", vec![1], None));
        assert!(session.questions.iter().all(|q| !q.is_submitted));
    }

    #[test]
    fn test_set_flag_is_idempotent() {
        let mut session = sample_session(3);

        session.set_flag("q3", true);
        session.set_flag("q3", true);
        assert_eq!(session.flagged_question_ids.len(), 1);

        session.set_flag("q3", false);
        session.set_flag("q3", false);
        assert!(session.flagged_question_ids.is_empty());
    }

    #[test]
    fn test_complete_is_monotonic() {
        let mut session = sample_session(1);

        assert!(session.complete());
        assert!(session.is_completed());
        assert!(!session.complete(), "second completion is refused");
    }

    #[test]
    fn test_status_codes_roundtrip() {
        assert_eq!(
            SessionStatus::parse("in_progress"),
            Some(SessionStatus::InProgress)
        );
        assert_eq!(
            SessionStatus::parse("completed"),
            Some(SessionStatus::Completed)
        );
        assert_eq!(SessionStatus::parse("paused"), None);
        assert_eq!(SessionStatus::InProgress.as_str(), "in_progress");
    }
}

#[cfg(test)]
mod aggregator_tests {
    use super::support::*;
    use crate::domain::entities::QuestionProgress;
    use crate::domain::services::{CorrectnessRule, question_correctness, summarize};

    #[test]
    fn test_any_overlap_rule() {
        let rule = CorrectnessRule::AnyOverlap;

        assert!(rule.is_correct(&[1], &[1, 2]));
        assert!(rule.is_correct(&[0, 2], &[2]), "partial overlap counts");
        assert!(!rule.is_correct(&[0], &[1, 2]));
        assert!(!rule.is_correct(&[], &[1]));
    }

    #[test]
    fn test_exact_match_rule() {
        let rule = CorrectnessRule::ExactMatch;

        assert!(rule.is_correct(&[1, 2], &[2, 1]), "order does not matter");
        assert!(!rule.is_correct(&[1], &[1, 2]), "partial overlap fails");
        assert!(!rule.is_correct(&[1, 2, 3], &[1, 2]));
    }

    #[test]
    fn test_unsubmitted_question_has_no_correctness() {
        let progress = QuestionProgress::empty("q1");
        assert_eq!(
            question_correctness(&progress, &sample_key(1), CorrectnessRule::AnyOverlap),
            None
        );
    }

    #[test]
    fn test_question_missing_from_key_has_no_correctness() {
        let mut progress = QuestionProgress::empty("q99");
        progress.record(vec![1], None);
        assert_eq!(
            question_correctness(&progress, &sample_key(1), CorrectnessRule::AnyOverlap),
            None
        );
    }

    #[test]
    fn test_summarize_counts() {
        let mut session = sample_session(4);
        session.record_answer("q1", vec![1], Some(20)); // correct
        session.record_answer("q2", vec![0], Some(40)); // incorrect
        session.set_flag("q3", true);
        session.set_bookmark("q1", true);
        session.set_bookmark("q4", true);

        let stats = summarize(&session, &sample_key(4), CorrectnessRule::AnyOverlap);

        assert_eq!(stats.answered, 2);
        assert_eq!(stats.unanswered, 2);
        assert_eq!(stats.correct, 1);
        assert_eq!(stats.incorrect, 1);
        assert_eq!(stats.flagged, 1);
        assert_eq!(stats.bookmarked, 2);
        assert_eq!(stats.total_time_spent_seconds, 60);
        assert!((stats.accuracy - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_accuracy_zero_when_nothing_answered() {
        let session = sample_session(3);
        let stats = summarize(&session, &sample_key(3), CorrectnessRule::AnyOverlap);

        assert_eq!(stats.answered, 0);
        assert_eq!(stats.accuracy, 0.0);
    }
}

#[cfg(test)]
mod controller_tests {
    use super::support::*;
    use crate::application::ApplyOperationUseCase;
    use crate::domain::repository::PracticeSessionRepository;
    use crate::domain::value_objects::SessionOperation;
    use crate::error::PracticeError;
    use crate::presentation::dto::SessionOperationRequest;
    use kernel::id::SessionId;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_advance_stores_index() {
        let session = sample_session(5);
        let session_id = session.session_id;
        let (repo, catalog) = seeded_repo(&session).await;
        let use_case = ApplyOperationUseCase::new(Arc::new(repo), Arc::new(catalog));

        let snapshot = use_case
            .execute(
                session_id,
                SessionOperation::Advance {
                    current_question_index: 2,
                },
            )
            .await
            .unwrap();

        assert_eq!(snapshot.session.current_question_index, 2);
    }

    #[tokio::test]
    async fn test_advance_negative_clamps_to_zero() {
        let session = sample_session(5);
        let session_id = session.session_id;
        let (repo, catalog) = seeded_repo(&session).await;
        let use_case = ApplyOperationUseCase::new(Arc::new(repo), Arc::new(catalog));

        // Through the wire mapper, as a client would send it
        let operation = SessionOperationRequest::Advance {
            current_question_index: -3.0,
        }
        .into_operation()
        .unwrap();

        let snapshot = use_case.execute(session_id, operation).await.unwrap();
        assert_eq!(snapshot.session.current_question_index, 0);
    }

    #[tokio::test]
    async fn test_advance_past_end_clamps_to_last_question() {
        let session = sample_session(5);
        let session_id = session.session_id;
        let (repo, catalog) = seeded_repo(&session).await;
        let use_case = ApplyOperationUseCase::new(Arc::new(repo), Arc::new(catalog));

        let snapshot = use_case
            .execute(
                session_id,
                SessionOperation::Advance {
                    current_question_index: 99,
                },
            )
            .await
            .unwrap();

        assert_eq!(snapshot.session.current_question_index, 4);
    }

    #[tokio::test]
    async fn test_record_answer_overwrites_previous_selection() {
        let session = sample_session(3);
        let session_id = session.session_id;
        let (repo, catalog) = seeded_repo(&session).await;
        let use_case = ApplyOperationUseCase::new(Arc::new(repo), Arc::new(catalog));

        use_case
            .execute(
                session_id,
                SessionOperation::RecordAnswer {
                    question_id: "q1".to_string(),
                    selected_answers: vec![0, 2],
                    time_spent_seconds: Some(10),
                },
            )
            .await
            .unwrap();

        let snapshot = use_case
            .execute(
                session_id,
                SessionOperation::RecordAnswer {
                    question_id: "q1".to_string(),
                    selected_answers: vec![1],
                    time_spent_seconds: Some(25),
                },
            )
            .await
            .unwrap();

        let q1 = snapshot.session.question("q1").unwrap();
        assert_eq!(q1.selected_answers, vec![1], "no union with the first call");
        assert!(q1.is_submitted);
        assert_eq!(q1.time_spent_seconds, Some(25), "overwritten, not summed");
    }

    #[tokio::test]
    async fn test_update_timer_overwrites() {
        let session = sample_session(2);
        let session_id = session.session_id;
        let (repo, catalog) = seeded_repo(&session).await;
        let use_case = ApplyOperationUseCase::new(Arc::new(repo), Arc::new(catalog));

        use_case
            .execute(
                session_id,
                SessionOperation::UpdateTimer {
                    remaining_seconds: 900,
                },
            )
            .await
            .unwrap();

        let snapshot = use_case
            .execute(
                session_id,
                SessionOperation::UpdateTimer {
                    remaining_seconds: 870,
                },
            )
            .await
            .unwrap();

        assert_eq!(snapshot.session.remaining_seconds, 870);
    }

    #[tokio::test]
    async fn test_toggle_flag_roundtrip() {
        let session = sample_session(3);
        let session_id = session.session_id;
        let (repo, catalog) = seeded_repo(&session).await;
        let use_case = ApplyOperationUseCase::new(Arc::new(repo), Arc::new(catalog));

        let snapshot = use_case
            .execute(
                session_id,
                SessionOperation::ToggleFlag {
                    question_id: "q3".to_string(),
                    flagged: true,
                },
            )
            .await
            .unwrap();
        assert!(snapshot.session.flagged_question_ids.contains("q3"));

        let snapshot = use_case
            .execute(
                session_id,
                SessionOperation::ToggleFlag {
                    question_id: "q3".to_string(),
                    flagged: false,
                },
            )
            .await
            .unwrap();
        assert!(!snapshot.session.flagged_question_ids.contains("q3"));
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let session = sample_session(2);
        let (repo, catalog) = seeded_repo(&session).await;
        let use_case = ApplyOperationUseCase::new(Arc::new(repo), Arc::new(catalog));

        let result = use_case
            .execute(
                SessionId::new(),
                SessionOperation::UpdateTimer {
                    remaining_seconds: 60,
                },
            )
            .await;

        assert!(matches!(result, Err(PracticeError::SessionNotFound)));
    }

    #[tokio::test]
    async fn test_unknown_question_is_rejected_before_write() {
        let session = sample_session(2);
        let session_id = session.session_id;
        let (repo, catalog) = seeded_repo(&session).await;
        let repo = Arc::new(repo);
        let use_case = ApplyOperationUseCase::new(repo.clone(), Arc::new(catalog));

        let before = repo.get(session_id).await.unwrap().unwrap();

        let result = use_case
            .execute(
                session_id,
                SessionOperation::ToggleFlag {
                    question_id: "q9".to_string(),
                    flagged: true,
                },
            )
            .await;
        assert!(matches!(result, Err(PracticeError::UnknownQuestion(_))));

        let after = repo.get(session_id).await.unwrap().unwrap();
        assert_eq!(after.updated_at, before.updated_at, "no write happened");
    }

    #[tokio::test]
    async fn test_completed_session_rejects_every_operation() {
        let session = sample_session(3);
        let session_id = session.session_id;
        let (repo, catalog) = seeded_repo(&session).await;
        let repo = Arc::new(repo);
        repo.mark_completed(session_id).await.unwrap();

        let before = repo.get(session_id).await.unwrap().unwrap();
        let use_case = ApplyOperationUseCase::new(repo.clone(), Arc::new(catalog));

        let operations = vec![
            SessionOperation::Advance {
                current_question_index: 1,
            },
            SessionOperation::ToggleFlag {
                question_id: "q1".to_string(),
                flagged: true,
            },
            SessionOperation::ToggleBookmark {
                question_id: "q1".to_string(),
                bookmarked: true,
            },
            SessionOperation::UpdateTimer {
                remaining_seconds: 10,
            },
            SessionOperation::RecordAnswer {
                question_id: "q1".to_string(),
                selected_answers: vec![1],
                time_spent_seconds: None,
            },
        ];

        for operation in operations {
            let result = use_case.execute(session_id, operation).await;
            assert!(matches!(result, Err(PracticeError::SessionCompleted)));
        }

        let after = repo.get(session_id).await.unwrap().unwrap();
        assert_eq!(after.updated_at, before.updated_at);
        assert_eq!(after.current_question_index, before.current_question_index);
        assert!(after.flagged_question_ids.is_empty());
        assert!(after.questions.iter().all(|q| !q.is_submitted));
    }

    #[tokio::test]
    async fn test_updated_at_refreshes_on_accepted_mutation() {
        let session = sample_session(2);
        let session_id = session.session_id;
        let (repo, catalog) = seeded_repo(&session).await;
        let repo = Arc::new(repo);
        let use_case = ApplyOperationUseCase::new(repo.clone(), Arc::new(catalog));

        let before = repo.get(session_id).await.unwrap().unwrap();

        let snapshot = use_case
            .execute(
                session_id,
                SessionOperation::UpdateTimer {
                    remaining_seconds: 300,
                },
            )
            .await
            .unwrap();

        assert!(snapshot.session.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_concurrent_record_answers_both_persist() {
        let session = sample_session(3);
        let session_id = session.session_id;
        let (repo, catalog) = seeded_repo(&session).await;
        let repo = Arc::new(repo);
        let use_case = Arc::new(ApplyOperationUseCase::new(repo.clone(), Arc::new(catalog)));

        let first = use_case.execute(
            session_id,
            SessionOperation::RecordAnswer {
                question_id: "q1".to_string(),
                selected_answers: vec![1],
                time_spent_seconds: Some(5),
            },
        );
        let second = use_case.execute(
            session_id,
            SessionOperation::RecordAnswer {
                question_id: "q2".to_string(),
                selected_answers: vec![2],
                time_spent_seconds: Some(7),
            },
        );

        let (first, second) = tokio::join!(first, second);
        first.unwrap();
        second.unwrap();

        let stored = repo.get(session_id).await.unwrap().unwrap();
        assert!(stored.question("q1").unwrap().is_submitted);
        assert!(stored.question("q2").unwrap().is_submitted);
        assert_eq!(stored.question("q1").unwrap().selected_answers, vec![1]);
        assert_eq!(stored.question("q2").unwrap().selected_answers, vec![2]);
    }
}

#[cfg(test)]
mod store_tests {
    use super::support::*;
    use crate::domain::repository::{ExamCatalog, PracticeSessionRepository};
    use crate::error::PracticeError;
    use crate::infra::memory::StaticExamCatalog;

    #[tokio::test]
    async fn test_store_guards_against_completed_race() {
        let session = sample_session(2);
        let session_id = session.session_id;
        let (repo, _) = seeded_repo(&session).await;

        repo.mark_completed(session_id).await.unwrap();

        // A writer that raced past the controller's status check still
        // cannot touch the record
        let result = repo.advance_question(session_id, 1).await;
        assert!(matches!(result, Err(PracticeError::SessionCompleted)));
    }

    #[tokio::test]
    async fn test_mark_completed_twice_is_refused() {
        let session = sample_session(1);
        let session_id = session.session_id;
        let (repo, _) = seeded_repo(&session).await;

        let completed = repo.mark_completed(session_id).await.unwrap().unwrap();
        assert!(completed.is_completed());

        let result = repo.mark_completed(session_id).await;
        assert!(matches!(result, Err(PracticeError::SessionCompleted)));
    }

    #[tokio::test]
    async fn test_missing_session_is_none() {
        let session = sample_session(1);
        let (repo, _) = seeded_repo(&session).await;

        let missing = repo
            .get(kernel::id::SessionId::new())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_catalog_returns_none_for_unknown_exam() {
        let catalog = StaticExamCatalog::single(EXAM, sample_key(2));

        assert!(catalog.answer_key(EXAM).await.unwrap().is_some());
        assert!(catalog.answer_key("unknown-exam").await.unwrap().is_none());
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::PracticeError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_status_codes() {
        let test_cases: Vec<(PracticeError, StatusCode)> = vec![
            (PracticeError::SessionNotFound, StatusCode::NOT_FOUND),
            (
                PracticeError::InvalidPayload("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (PracticeError::SessionCompleted, StatusCode::BAD_REQUEST),
            (
                PracticeError::UnknownQuestion("q9".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                PracticeError::InvariantViolation("bad state".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                PracticeError::Internal("oops".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_wire_codes_are_stable() {
        assert_eq!(PracticeError::SessionNotFound.code(), "SESSION_NOT_FOUND");
        assert_eq!(
            PracticeError::InvalidPayload("x".into()).code(),
            "INVALID_PAYLOAD"
        );
        assert_eq!(PracticeError::SessionCompleted.code(), "INVALID_PAYLOAD");
        assert_eq!(
            PracticeError::UnknownQuestion("q9".into()).code(),
            "INVALID_PAYLOAD"
        );
        assert_eq!(
            PracticeError::Internal("x".into()).code(),
            "PRACTICE_SESSION_UPDATE_FAILED"
        );
    }
}

#[cfg(test)]
mod config_tests {
    use crate::application::config::PracticeConfig;
    use crate::domain::services::CorrectnessRule;

    #[test]
    fn test_default_config() {
        let config = PracticeConfig::default();
        assert_eq!(config.correctness_rule, CorrectnessRule::AnyOverlap);
    }

    #[test]
    fn test_exact_match_config() {
        let config = PracticeConfig::exact_match();
        assert_eq!(config.correctness_rule, CorrectnessRule::ExactMatch);
    }
}
