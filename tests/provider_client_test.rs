use mockito::Matcher;
use recipe_finder::config::ProviderConfig;
use recipe_finder::provider::client::{DETAILS_OPERATION, SEARCH_OPERATION};
use recipe_finder::provider::RecipeClient;
use recipe_finder::search::SearchFilters;
use recipe_finder::Error;

fn client_for(server: &mockito::Server) -> RecipeClient {
    RecipeClient::new(&ProviderConfig::new(server.url(), "integration-key")).unwrap()
}

#[tokio::test]
async fn test_search_sends_filters_offset_and_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "green curry".into()),
            Matcher::UrlEncoded("cuisine".into(), "Thai".into()),
            Matcher::UrlEncoded("maxReadyTime".into(), "40".into()),
            Matcher::UrlEncoded("offset".into(), "27".into()),
            Matcher::UrlEncoded("number".into(), "9".into()),
            Matcher::UrlEncoded("apiKey".into(), "integration-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "results": [
                    {"id": 1, "title": "Thai Green Curry", "image": "https://img.example.com/1.jpg", "imageType": "jpg"}
                ],
                "offset": 27,
                "number": 9,
                "totalResults": 28
            }"#,
        )
        .create_async()
        .await;

    let filters = SearchFilters {
        query: Some("green curry".to_string()),
        cuisine: Some("Thai".to_string()),
        max_ready_time: Some("40".to_string()),
        page: 4,
    };
    let page = client_for(&server).search(&filters).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.offset, 27);
    assert_eq!(page.page_size, 9);
    assert_eq!(page.total_results, 28);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Thai Green Curry");
}

#[tokio::test]
async fn test_search_omits_empty_filters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Regex(
            "^query=pasta&offset=0&number=9&apiKey=integration-key$".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results": [], "offset": 0, "number": 9, "totalResults": 0}"#)
        .create_async()
        .await;

    let filters = SearchFilters {
        query: Some("pasta".to_string()),
        cuisine: Some(String::new()),
        ..SearchFilters::default()
    };
    let page = client_for(&server).search(&filters).await.unwrap();

    mock.assert_async().await;
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_zero_results_is_not_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results": [], "offset": 0, "number": 9, "totalResults": 0}"#)
        .create_async()
        .await;

    let result = client_for(&server).search(&SearchFilters::default()).await;

    let page = result.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_results, 0);
}

#[tokio::test]
async fn test_search_failure_is_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("upstream exploded")
        .expect(1)
        .create_async()
        .await;

    let result = client_for(&server).search(&SearchFilters::default()).await;

    // Exactly one call: failures are not retried
    mock.assert_async().await;
    match result {
        Err(Error::Fetch { operation, reason }) => {
            assert_eq!(operation, SEARCH_OPERATION);
            assert!(reason.contains("500"));
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = client_for(&server)
        .search(&SearchFilters::default())
        .await
        .unwrap_err();

    assert!(err.is_fetch());
    assert!(err.to_string().starts_with("fetchRecipes failed"));
}

#[tokio::test]
async fn test_unreachable_provider_is_fetch_error() {
    // Nothing listens on the discard port
    let client =
        RecipeClient::new(&ProviderConfig::new("http://127.0.0.1:9", "integration-key")).unwrap();

    let err = client.get_details("1").await.unwrap_err();

    match err {
        Error::Fetch { operation, reason } => {
            assert_eq!(operation, DETAILS_OPERATION);
            assert!(!reason.contains("integration-key"));
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_details() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/716429/information")
        .match_query(Matcher::UrlEncoded(
            "apiKey".into(),
            "integration-key".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "id": 716429,
                "title": "Pasta with Garlic",
                "image": "https://img.example.com/716429.jpg",
                "servings": 2,
                "readyInMinutes": 45,
                "summary": "<b>Quick</b> pasta.",
                "instructions": "Boil pasta.\nToss with garlic.",
                "sourceUrl": "https://example.com/pasta",
                "sourceName": "Example",
                "healthScore": 19,
                "dishTypes": ["lunch"],
                "diets": ["dairy free"],
                "extendedIngredients": [
                    {"id": 11215, "name": "garlic", "original": "2 cloves garlic", "amount": 2, "unit": "cloves", "image": "garlic.png"}
                ]
            }"#,
        )
        .create_async()
        .await;

    let recipe = client_for(&server).get_details("716429").await.unwrap();

    mock.assert_async().await;
    assert_eq!(recipe.id, 716429);
    assert_eq!(recipe.servings, 2);
    assert_eq!(recipe.health_score, 19.0);
    assert_eq!(recipe.ingredients[0].amount, 2.0);
    assert_eq!(recipe.diets, vec!["dairy free"]);
    assert!(recipe.wine_pairing.is_none());
}

#[tokio::test]
async fn test_detail_id_is_path_encoded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/recipes/a%2Fb/information")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let err = client_for(&server).get_details("a/b").await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err,
        Error::Fetch {
            operation: DETAILS_OPERATION,
            ..
        }
    ));
}

#[tokio::test]
async fn test_malformed_max_ready_time_is_forwarded() {
    let mut server = mockito::Server::new_async().await;
    let rejected = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "pasta".into()),
            Matcher::UrlEncoded("maxReadyTime".into(), "30.5".into()),
        ]))
        .with_status(400)
        .with_body(r#"{"status":"failure","code":400,"message":"maxReadyTime must be a number"}"#)
        .expect(1)
        .create_async()
        .await;

    let filters = SearchFilters {
        query: Some("pasta".to_string()),
        max_ready_time: Some("30.5".to_string()),
        ..SearchFilters::default()
    };
    let err = client_for(&server).search(&filters).await.unwrap_err();

    rejected.assert_async().await;
    match err {
        Error::Fetch { operation, reason } => {
            assert_eq!(operation, SEARCH_OPERATION);
            assert!(reason.contains("400"));
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}
