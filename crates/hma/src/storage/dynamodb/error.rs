//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `hma_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use hma_core::storage::StoreError;

/// Requests that never reached the service.
fn map_transport_error<E: Debug, R: Debug>(err: &SdkError<E, R>) -> Option<StoreError> {
    match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
            Some(StoreError::ServiceUnavailable(format!("{:?}", err)))
        }
        _ => None,
    }
}

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = map_transport_error(&err) {
        return err;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            StoreError::TableNotFound(table_name.to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::Throttled("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            StoreError::Throttled("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            StoreError::ServiceUnavailable("DynamoDB internal server error".to_string())
        }
        err => StoreError::Request(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to StoreError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = map_transport_error(&err) {
        return err;
    }
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => {
            StoreError::TableNotFound(table_name.to_string())
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            StoreError::Throttled("Throughput exceeded, please retry".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            StoreError::Throttled("Request limit exceeded, please retry".to_string())
        }
        QueryError::InternalServerError(_) => {
            StoreError::ServiceUnavailable("DynamoDB internal server error".to_string())
        }
        err => StoreError::Request(format!("Query failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = map_transport_error(&err) {
        return err;
    }
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(e) => {
            StoreError::ConditionalCheckFailed(e.message().unwrap_or_default().to_string())
        }
        PutItemError::ResourceNotFoundException(_) => {
            StoreError::TableNotFound(table_name.to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::Throttled("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            StoreError::Throttled("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::Request("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            StoreError::Request("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StoreError::ServiceUnavailable("DynamoDB internal server error".to_string())
        }
        err => StoreError::Request(format!("PutItem failed: {:?}", err)),
    }
}
