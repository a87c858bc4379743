use async_trait::async_trait;

use super::{HttpConsoleApi, TestCasesApi};
use crate::domain::error::Result;
use crate::domain::test_case::{NewTestCase, RunTestCasesResponse, TestCase, TestCaseSummary};

fn collection(spec_id: &str) -> String {
    format!("/specs/{}/testcases/", spec_id)
}

fn member(spec_id: &str, test_case_id: &str) -> String {
    format!("/specs/{}/testcases/{}/", spec_id, test_case_id)
}

#[async_trait]
impl TestCasesApi for HttpConsoleApi {
    async fn list_test_cases(&self, spec_id: &str) -> Result<Vec<TestCaseSummary>> {
        self.http.get(&collection(spec_id)).await
    }

    async fn get_test_case(&self, spec_id: &str, test_case_id: &str) -> Result<TestCase> {
        self.http.get(&member(spec_id, test_case_id)).await
    }

    async fn create_test_case(&self, spec_id: &str, test_case: &NewTestCase) -> Result<TestCase> {
        self.http.post(&collection(spec_id), test_case).await
    }

    async fn update_test_case(
        &self,
        spec_id: &str,
        test_case_id: &str,
        test_case: &TestCase,
    ) -> Result<TestCase> {
        self.http.put(&member(spec_id, test_case_id), test_case).await
    }

    async fn delete_test_case(&self, spec_id: &str, test_case_id: &str) -> Result<()> {
        self.http.delete(&member(spec_id, test_case_id)).await
    }

    async fn run_test_cases(&self, spec_id: &str) -> Result<RunTestCasesResponse> {
        self.http
            .post_empty(&format!("/specs/{}/testcases/run", spec_id))
            .await
    }
}
