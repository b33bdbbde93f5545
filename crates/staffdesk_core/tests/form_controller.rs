mod common;

use async_trait::async_trait;
use common::{FakeContentApi, FailOn};
use staffdesk_core::{
    DraftField, EmployeeService, Field, FormController, ImageFile,
    LocalEmployeeStore, NotificationStatus, Notifier, RemoteEmployeeStore, RemoteError,
    RemoveOutcome, StoreError, SubmitOutcome, ValidationError, ValidationProfile, WelcomeEmail,
    DELETE_PROMPT,
};
use std::sync::{Arc, Mutex};

fn local_service() -> EmployeeService<LocalEmployeeStore> {
    EmployeeService::new(LocalEmployeeStore::new(ValidationProfile::Basic))
}

fn fill(form: &mut FormController, name: &str, department: &str) {
    form.open();
    form.set_field(DraftField::Name, name);
    form.set_field(DraftField::Email, format!("{}@x.com", name.to_lowercase()));
    form.set_field(DraftField::Department, department);
    form.set_field(DraftField::Position, "Dev");
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<WelcomeEmail>>,
    fail: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), RemoteError> {
        if self.fail {
            return Err(RemoteError::status(503, "Service Unavailable"));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

#[tokio::test]
async fn submit_creates_and_clears_draft() {
    let mut service = local_service();
    let mut form = FormController::new(ValidationProfile::Basic);
    fill(&mut form, "Ann", "Eng");

    let outcome = form.submit(&mut service).await.unwrap();

    let SubmitOutcome::Created {
        employee,
        notification,
    } = outcome
    else {
        panic!("expected create");
    };
    assert_eq!(employee.name, "Ann");
    assert_eq!(notification, NotificationStatus::NotConfigured);
    assert_eq!(form.draft().get(DraftField::Name), "");
    assert!(!form.is_open());
    assert_eq!(service.stats().total, 1);
}

#[tokio::test]
async fn invalid_submit_keeps_draft_and_store() {
    let mut service = local_service();
    let mut form = FormController::new(ValidationProfile::Basic);
    fill(&mut form, "Ann", "");
    let draft_before = form.draft().clone();

    let err = form.submit(&mut service).await.unwrap_err();

    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::MissingField(Field::Department))
    ));
    assert_eq!(form.draft(), &draft_before);
    assert!(form.is_open());
    assert!(service.store().records().is_empty());
}

#[tokio::test]
async fn edit_submit_updates_target_in_place() {
    let mut service = local_service();
    let mut form = FormController::new(ValidationProfile::Basic);
    fill(&mut form, "Ann", "Eng");
    form.submit(&mut service).await.unwrap();
    fill(&mut form, "Bob", "Eng");
    form.submit(&mut service).await.unwrap();

    let ann = service.store().records()[0].clone();
    form.begin_edit(&ann);
    assert_eq!(form.edit_target(), Some(&ann.id));
    assert_eq!(form.draft().get(DraftField::Email), "ann@x.com");

    assert!(form.set_input("department", "Ops"));
    let outcome = form.submit(&mut service).await.unwrap();

    let SubmitOutcome::Updated(updated) = outcome else {
        panic!("expected update");
    };
    assert_eq!(updated.id, ann.id);
    assert_eq!(updated.department_label(), Some("Ops"));
    assert!(!form.is_editing());

    let records = service.store().records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], updated);
    assert_eq!(service.stats().by_department.get("Ops"), Some(&1));
}

#[tokio::test]
async fn begin_edit_replaces_previous_target() {
    let mut service = local_service();
    let mut form = FormController::new(ValidationProfile::Basic);
    fill(&mut form, "Ann", "Eng");
    form.submit(&mut service).await.unwrap();
    fill(&mut form, "Bob", "Sales");
    form.submit(&mut service).await.unwrap();

    let records = service.store().records().to_vec();
    form.begin_edit(&records[0]);
    form.begin_edit(&records[1]);

    assert_eq!(form.edit_target(), Some(&records[1].id));
    assert_eq!(form.draft().get(DraftField::Name), "Bob");
}

#[tokio::test]
async fn cancel_discards_draft_without_mutation() {
    let mut service = local_service();
    let mut form = FormController::new(ValidationProfile::Basic);
    fill(&mut form, "Ann", "Eng");
    form.submit(&mut service).await.unwrap();

    let ann = service.store().records()[0].clone();
    form.begin_edit(&ann);
    form.set_field(DraftField::Department, "Ops");
    form.attach_image(ImageFile::new("ann.png", "image/png", vec![0]));
    form.cancel();

    assert!(!form.is_editing());
    assert_eq!(form.draft().get(DraftField::Department), "");
    assert!(form.draft().profile_image.is_none());
    assert_eq!(service.store().records(), &[ann]);
    assert_eq!(service.store().live_images(), 0);
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let mut service = local_service();
    let mut form = FormController::new(ValidationProfile::Basic);
    fill(&mut form, "Ann", "Eng");
    form.submit(&mut service).await.unwrap();
    let ann = service.store().records()[0].clone();

    let asked = Mutex::new(Vec::new());
    let decline = |message: &str| {
        asked.lock().unwrap().push(message.to_string());
        false
    };
    let outcome = form.delete(&mut service, &ann.id, &decline).await.unwrap();
    assert_eq!(outcome, RemoveOutcome::Declined);
    assert_eq!(*asked.lock().unwrap(), vec![DELETE_PROMPT.to_string()]);
    assert_eq!(service.store().records().len(), 1);

    form.begin_edit(&ann);
    let outcome = form
        .delete(&mut service, &ann.id, &|_: &str| true)
        .await
        .unwrap();
    assert_eq!(outcome, RemoveOutcome::Removed);
    assert!(!form.is_editing());
    assert_eq!(service.stats().total, 0);
}

#[tokio::test]
async fn welcome_notification_follows_create() {
    let notifier = Arc::new(RecordingNotifier::default());
    let mut service = local_service().with_notifier(notifier.clone());
    let mut form = FormController::new(ValidationProfile::Basic);
    fill(&mut form, "Ann", "Eng");

    let outcome = form.submit(&mut service).await.unwrap();

    assert!(matches!(
        outcome,
        SubmitOutcome::Created {
            notification: NotificationStatus::Sent,
            ..
        }
    ));
    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ann@x.com");
    assert_eq!(sent[0].subject, "Welcome to Our Company!");
}

#[tokio::test]
async fn failed_notification_keeps_created_record() {
    let notifier = Arc::new(RecordingNotifier {
        fail: true,
        ..RecordingNotifier::default()
    });
    let mut service = local_service().with_notifier(notifier);
    let mut form = FormController::new(ValidationProfile::Basic);
    fill(&mut form, "Ann", "Eng");

    let outcome = form.submit(&mut service).await.unwrap();

    assert!(matches!(
        outcome,
        SubmitOutcome::Created {
            notification: NotificationStatus::Failed(_),
            ..
        }
    ));
    assert_eq!(service.store().records().len(), 1);
}

#[tokio::test]
async fn remote_edit_round_trips_catalog_ids() {
    let store = RemoteEmployeeStore::new(FakeContentApi::new(), ValidationProfile::Basic);
    let mut service = EmployeeService::new(store);
    let mut form = FormController::new(ValidationProfile::Basic);
    fill(&mut form, "Ann", "1");
    form.set_field(DraftField::Position, "2");
    form.submit(&mut service).await.unwrap();

    let ann = service.list().await.unwrap().remove(0);
    assert_eq!(ann.department_label(), Some("Engineering"));

    form.begin_edit(&ann);
    assert_eq!(form.draft().get(DraftField::Department), "1");
    assert_eq!(form.draft().get(DraftField::Position), "2");

    form.set_field(DraftField::Department, "2");
    form.submit(&mut service).await.unwrap();
    assert_eq!(service.stats().by_department.get("Sales"), Some(&1));
}

#[tokio::test]
async fn remote_failure_keeps_draft_for_retry() {
    let store = RemoteEmployeeStore::new(FakeContentApi::new(), ValidationProfile::Basic);
    let mut service = EmployeeService::new(store);
    let mut form = FormController::new(ValidationProfile::Basic);
    fill(&mut form, "Ann", "1");

    service.store().api().fail_next(FailOn::Create);
    let err = form.submit(&mut service).await.unwrap_err();
    assert!(matches!(err, StoreError::Remote(_)));
    assert_eq!(form.draft().get(DraftField::Name), "Ann");
    assert_eq!(service.stats().total, 0);

    form.submit(&mut service).await.unwrap();
    assert_eq!(service.snapshot().len(), 1);
}

#[tokio::test]
async fn remote_submits_past_first_page_clear_the_draft() {
    let store = RemoteEmployeeStore::new(FakeContentApi::new(), ValidationProfile::Basic)
        .with_page_size(2);
    let mut service = EmployeeService::new(store);
    let mut form = FormController::new(ValidationProfile::Basic);

    for name in ["Ann", "Bob", "Cy"] {
        fill(&mut form, name, "1");
        let outcome = form.submit(&mut service).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Created { ref employee, .. } if employee.name == name));
        assert_eq!(form.draft().get(DraftField::Name), "");
    }

    assert_eq!(service.store().api().server_count(), 3);
    assert_eq!(service.snapshot().len(), 3);
    assert_eq!(service.stats().total, 3);
}
