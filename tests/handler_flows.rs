use casos_iso::{
    api::EvaluationDetails,
    handlers::HandlerOutcome,
    view::{
        CASE_TEXT_PROMPT, EVALUATION_FALLBACK_MESSAGE, NotificationKind, SELECT_FILE_PROMPT,
        TRANSPORT_FAILURE_MESSAGE, UPLOAD_FALLBACK_MESSAGE, USER_RESPONSE_PROMPT, View,
    },
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

mod common;
use common::test_utils::{create_test_handlers, sample_pdf};

async fn mount_json(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Upload,
    Analyze,
    Evaluate,
}

#[rstest]
#[case(Action::Upload, "", SELECT_FILE_PROMPT)]
#[case(Action::Analyze, "", CASE_TEXT_PROMPT)]
#[case(Action::Analyze, "   \n\t", CASE_TEXT_PROMPT)]
#[case(Action::Evaluate, "", USER_RESPONSE_PROMPT)]
#[case(Action::Evaluate, "  ", USER_RESPONSE_PROMPT)]
#[tokio::test]
async fn test_blank_input_sends_nothing(
    #[case] action: Action,
    #[case] text: &str,
    #[case] prompt: &str,
) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let (handlers, view, notifier) = create_test_handlers(&server);
    view.set_case_text(text);
    view.set_user_response(text);

    let outcome = match action {
        Action::Upload => handlers.upload().await,
        Action::Analyze => handlers.request_analysis().await,
        Action::Evaluate => handlers.evaluate().await,
    };

    assert_eq!(outcome, HandlerOutcome::Rejected);
    assert_eq!(notifier.messages(), vec![prompt.to_string()]);
    assert_eq!(notifier.kinds(), vec![NotificationKind::Validation]);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_shows_server_message() {
    let server = MockServer::start().await;
    mount_json(&server, "/upload-iso", 200, json!({"message": "ok"})).await;

    let (handlers, view, notifier) = create_test_handlers(&server);
    view.select_file(sample_pdf());

    assert_eq!(handlers.upload().await, HandlerOutcome::Rendered);
    assert_eq!(notifier.messages(), vec!["ok".to_string()]);
    assert_eq!(notifier.kinds(), vec![NotificationKind::Info]);
}

#[tokio::test]
async fn test_upload_shows_server_error() {
    let server = MockServer::start().await;
    mount_json(&server, "/upload-iso", 400, json!({"error": "bad file"})).await;

    let (handlers, view, notifier) = create_test_handlers(&server);
    view.select_file(sample_pdf());

    assert_eq!(handlers.upload().await, HandlerOutcome::ServerError);
    assert_eq!(notifier.messages(), vec!["bad file".to_string()]);
    assert_eq!(notifier.kinds(), vec![NotificationKind::ServerError]);
}

#[tokio::test]
async fn test_analysis_fills_field() {
    let server = MockServer::start().await;
    mount_json(&server, "/analyze-case", 200, json!({"analysis": "text"})).await;

    let (handlers, view, notifier) = create_test_handlers(&server);
    view.set_case_text("Un funcionario recibe un regalo");

    assert_eq!(handlers.request_analysis().await, HandlerOutcome::Rendered);
    assert_eq!(view.snapshot().analysis, "text");
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_analysis_error_leaves_field_unchanged() {
    let server = MockServer::start().await;
    mount_json(&server, "/analyze-case", 400, json!({"error": "no case"})).await;

    let (handlers, view, notifier) = create_test_handlers(&server);
    view.set_case_text("Caso");
    view.set_analysis("análisis anterior");

    assert_eq!(handlers.request_analysis().await, HandlerOutcome::ServerError);
    assert_eq!(view.snapshot().analysis, "análisis anterior");
    assert_eq!(notifier.messages(), vec!["no case".to_string()]);
}

#[tokio::test]
async fn test_evaluation_renders_all_fields_and_opens_modal() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/evaluate-response",
        200,
        json!({
            "calificacionIA": 8,
            "calificacionUsuario": 6,
            "confianzaIA": "high",
            "confianzaUsuario": "medium",
            "comentarioGeneral": "good"
        }),
    )
    .await;

    let (handlers, view, notifier) = create_test_handlers(&server);
    view.set_user_response("Mi análisis propio");

    assert_eq!(handlers.evaluate().await, HandlerOutcome::Rendered);

    let state = view.snapshot();
    assert_eq!(state.ai_score, "8");
    assert_eq!(state.user_score, "6");
    assert_eq!(state.ai_confidence, "high");
    assert_eq!(state.user_confidence, "medium");
    assert_eq!(state.general_comment, "good");
    assert!(state.evaluation_modal_open);
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_evaluation_error_does_not_open_modal() {
    let server = MockServer::start().await;
    mount_json(&server, "/evaluate-response", 400, json!({"error": "bad input"})).await;

    let (handlers, view, notifier) = create_test_handlers(&server);
    view.set_user_response("Mi análisis propio");

    assert_eq!(handlers.evaluate().await, HandlerOutcome::ServerError);
    assert!(!view.snapshot().evaluation_modal_open);
    assert_eq!(notifier.messages(), vec!["bad input".to_string()]);
}

#[tokio::test]
async fn test_evaluation_empty_body_uses_fallback() {
    let server = MockServer::start().await;
    mount_json(&server, "/evaluate-response", 200, json!({})).await;

    let (handlers, view, notifier) = create_test_handlers(&server);
    view.set_user_response("Mi análisis propio");

    assert_eq!(handlers.evaluate().await, HandlerOutcome::ServerError);
    assert!(!view.snapshot().evaluation_modal_open);
    assert_eq!(
        notifier.messages(),
        vec![EVALUATION_FALLBACK_MESSAGE.to_string()]
    );
}

#[tokio::test]
async fn test_evaluation_details_reach_the_view() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/evaluate-response",
        200,
        json!({
            "calificacionIA": 7.0,
            "calificacionUsuario": 6.0,
            "confianzaIA": 85,
            "confianzaUsuario": 70,
            "comentarioGeneral": "No se pudo extraer una evaluación estructurada.",
            "fortalezasIA": ["Análisis estructurado"],
            "debilidadesUsuario": ["No especificado"],
            "recomendacionMejora": "Revisa la estructura y contenido de tu análisis."
        }),
    )
    .await;

    let (handlers, view, _notifier) = create_test_handlers(&server);
    view.set_user_response("Mi análisis propio");
    handlers.evaluate().await;

    let state = view.snapshot();
    assert_eq!(state.ai_score, "7");
    assert_eq!(
        state.evaluation_details.ai_strengths,
        vec!["Análisis estructurado".to_string()]
    );
    assert_eq!(
        state.evaluation_details.user_weaknesses,
        vec!["No especificado".to_string()]
    );
    assert!(state.evaluation_details.recommendation.is_some());
}

#[test_log::test(tokio::test)]
async fn test_unreadable_body_produces_one_failure_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-case"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let (handlers, view, notifier) = create_test_handlers(&server);
    view.set_case_text("Caso");

    assert_eq!(
        handlers.request_analysis().await,
        HandlerOutcome::TransportFailed
    );
    assert_eq!(view.snapshot().analysis, "");
    assert_eq!(
        notifier.messages(),
        vec![TRANSPORT_FAILURE_MESSAGE.to_string()]
    );
    assert_eq!(notifier.kinds(), vec![NotificationKind::Failure]);
}

#[tokio::test]
async fn test_session_id_is_shared_by_every_request() {
    let server = MockServer::start().await;
    mount_json(&server, "/upload-iso", 200, json!({"message": "ok"})).await;
    mount_json(&server, "/analyze-case", 200, json!({"analysis": "a"})).await;
    mount_json(&server, "/evaluate-response", 200, json!({"calificacionIA": 5})).await;

    let (handlers, view, _notifier) = create_test_handlers(&server);
    view.select_file(sample_pdf());
    view.set_case_text("Caso");
    view.set_user_response("Respuesta");

    // Independent clicks may overlap.
    let (a, b, c) = tokio::join!(
        handlers.upload(),
        handlers.request_analysis(),
        handlers.evaluate()
    );
    assert_eq!(a, HandlerOutcome::Rendered);
    assert_eq!(b, HandlerOutcome::Rendered);
    assert_eq!(c, HandlerOutcome::Rendered);
    handlers.request_analysis().await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);

    let expected = handlers.session().id().to_string();
    for request in &requests {
        if request.url.path() == "/upload-iso" {
            let body = String::from_utf8_lossy(&request.body);
            assert!(body.contains(&expected));
        } else {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            assert_eq!(body["session_id"], Value::String(expected.clone()));
        }
    }
}

#[tokio::test]
async fn test_upload_without_message_or_error_uses_fallback() {
    let server = MockServer::start().await;
    mount_json(&server, "/upload-iso", 200, json!({"success": false})).await;

    let (handlers, view, notifier) = create_test_handlers(&server);
    view.select_file(sample_pdf());

    assert_eq!(handlers.upload().await, HandlerOutcome::ServerError);
    assert_eq!(
        notifier.messages(),
        vec![UPLOAD_FALLBACK_MESSAGE.to_string()]
    );
    assert_eq!(notifier.kinds(), vec![NotificationKind::ServerError]);
}

#[tokio::test]
async fn test_null_ai_score_still_opens_modal() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/evaluate-response",
        200,
        json!({"calificacionIA": null, "comentarioGeneral": "c"}),
    )
    .await;

    let (handlers, view, notifier) = create_test_handlers(&server);
    view.set_user_response("Mi análisis propio");

    assert_eq!(handlers.evaluate().await, HandlerOutcome::Rendered);

    let state = view.snapshot();
    assert!(state.evaluation_modal_open);
    assert_eq!(state.ai_score, "");
    assert_eq!(state.general_comment, "c");
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn test_second_evaluation_replaces_previous_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/evaluate-response"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "calificacionIA": 7,
            "fortalezasIA": ["Cita la cláusula 8.2"],
            "recomendacionMejora": "Profundiza en la diligencia debida"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_json(&server, "/evaluate-response", 200, json!({"calificacionIA": 9})).await;

    let (handlers, view, _notifier) = create_test_handlers(&server);
    view.set_user_response("Mi análisis propio");

    assert_eq!(handlers.evaluate().await, HandlerOutcome::Rendered);
    assert_eq!(
        view.snapshot().evaluation_details.ai_strengths,
        vec!["Cita la cláusula 8.2".to_string()]
    );

    assert_eq!(handlers.evaluate().await, HandlerOutcome::Rendered);
    let state = view.snapshot();
    assert_eq!(state.ai_score, "9");
    assert_eq!(state.evaluation_details, EvaluationDetails::default());
}
