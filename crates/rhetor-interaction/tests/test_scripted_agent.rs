use rhetor_core::catalog::Side;
use rhetor_interaction::fallback::canned_counter_arguments;
use rhetor_interaction::{DEBATER_PERSONAS, ReplyRequest, ScriptedAgent, SparringAgent};

fn request(side: Side) -> ReplyRequest {
    ReplyRequest::new(
        "Should homework be abolished?",
        "Homework eats into time children need for rest and play.",
        side,
        DEBATER_PERSONAS[0],
    )
}

#[tokio::test]
async fn test_scripted_reply_argues_the_requested_side() {
    let agent = ScriptedAgent::from_seed(21);

    let reply = agent
        .counter_argument(&request(Side::Against))
        .await
        .expect("Scripted agent never fails");

    // The reply body comes from the bank for the side being argued.
    assert!(
        canned_counter_arguments(Side::Against)
            .iter()
            .any(|body| reply.contains(body)),
        "Reply should use the against-side bank: {reply}"
    );
    assert!(!reply.is_empty());
}

#[tokio::test]
async fn test_scripted_reply_opens_in_persona_voice() {
    let agent = ScriptedAgent::from_seed(21);
    let persona = DEBATER_PERSONAS[0];

    let reply = agent
        .counter_argument(&request(Side::For))
        .await
        .expect("Scripted agent never fails");

    assert!(
        persona.openers.iter().any(|opener| reply.starts_with(opener)),
        "Reply should start with one of {}'s openers: {reply}",
        persona.name
    );
}

#[tokio::test]
async fn test_same_seed_gives_same_replies() {
    let first = ScriptedAgent::from_seed(5)
        .counter_argument(&request(Side::For))
        .await
        .unwrap();
    let second = ScriptedAgent::from_seed(5)
        .counter_argument(&request(Side::For))
        .await
        .unwrap();

    assert_eq!(first, second, "Seeded agents should be deterministic");
}

#[tokio::test]
async fn test_identification_feedback_grades_locally() {
    let agent = ScriptedAgent::from_seed(3);

    let praise = agent
        .identification_feedback("Straw Man", "Straw Man")
        .await
        .unwrap();
    let correction = agent
        .identification_feedback("Red Herring", "Straw Man")
        .await
        .unwrap();

    assert!(praise.contains("Excellent identification"));
    assert!(correction.contains("Straw Man"), "Should name the right answer");
}
